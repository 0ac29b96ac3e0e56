//! Construcción de consultas de listado y actualización
//!
//! Los filtros de cada entidad se traducen a condiciones con parámetros
//! ligados (`QueryBuilder::push_bind`); los nombres de columna sólo vienen
//! de listas fijas del código.

use chrono::NaiveDate;
use sqlx::{postgres::PgRow, Encode, FromRow, PgPool, Postgres, QueryBuilder, Type};

use crate::dto::common_dto::{ListParams, Page};
use crate::utils::errors::AppResult;
use crate::utils::patch::Patch;

/// Filtro tipado de un listado
pub trait ListFilter {
    fn apply(&self, conditions: &mut Conditions<'_>) -> AppResult<()>;
}

/// Columnas por las que se permite ordenar: (nombre público, expresión SQL)
pub struct SortSpec {
    pub columns: &'static [(&'static str, &'static str)],
    pub default: &'static str,
}

impl SortSpec {
    /// Un `sortBy` desconocido cae en el orden por defecto
    pub fn resolve(&self, requested: Option<&str>) -> &'static str {
        requested
            .and_then(|name| {
                self.columns
                    .iter()
                    .find(|(public, _)| *public == name)
                    .map(|(_, sql)| *sql)
            })
            .unwrap_or(self.default)
    }
}

/// Cláusula WHERE acumulativa
pub struct Conditions<'q> {
    builder: QueryBuilder<'q, Postgres>,
    has_where: bool,
}

impl<'q> Conditions<'q> {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            builder: QueryBuilder::new(base),
            has_where: false,
        }
    }

    fn next_clause(&mut self) -> &mut QueryBuilder<'q, Postgres> {
        if self.has_where {
            self.builder.push(" AND ");
        } else {
            self.builder.push(" WHERE ");
            self.has_where = true;
        }
        &mut self.builder
    }

    /// Igualdad exacta (ids, banderas, textos cerrados)
    pub fn eq<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'q + Encode<'q, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.next_clause()
                .push(column)
                .push(" = ")
                .push_bind(value);
        }
        self
    }

    /// Substring sin distinguir mayúsculas; los strings vacíos no filtran
    pub fn contains(&mut self, column: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            let pattern = format!("%{}%", escape_like(value));
            self.next_clause()
                .push(column)
                .push(" ILIKE ")
                .push_bind(pattern);
        }
        self
    }

    /// Fecha exacta, comparando sólo el día calendario
    pub fn on_date(&mut self, column: &str, value: Option<NaiveDate>) -> &mut Self {
        if let Some(fecha) = value {
            self.next_clause()
                .push(column)
                .push("::date = ")
                .push_bind(fecha);
        }
        self
    }

    /// Rango cerrado de fechas para reportes
    pub fn between(
        &mut self,
        column: &str,
        desde: Option<NaiveDate>,
        hasta: Option<NaiveDate>,
    ) -> &mut Self {
        if let Some(desde) = desde {
            self.next_clause()
                .push(column)
                .push("::date >= ")
                .push_bind(desde);
        }
        if let Some(hasta) = hasta {
            self.next_clause()
                .push(column)
                .push("::date <= ")
                .push_bind(hasta);
        }
        self
    }

    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    pub fn into_builder(self) -> QueryBuilder<'q, Postgres> {
        self.builder
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Consulta de listado: `select` y `count` comparten el mismo FROM/JOIN
pub struct ListQuery {
    pub select: &'static str,
    pub count: &'static str,
    pub sort: SortSpec,
}

impl ListQuery {
    /// Arma la consulta de datos completa (filtros, orden y página)
    pub fn data_query<'q, F: ListFilter>(
        &self,
        filter: &F,
        params: &ListParams,
        default_page_size: i64,
    ) -> AppResult<QueryBuilder<'q, Postgres>> {
        let mut conditions = Conditions::new(self.select);
        filter.apply(&mut conditions)?;

        let mut builder = conditions.into_builder();
        builder
            .push(" ORDER BY ")
            .push(self.sort.resolve(params.sort_by.as_deref()))
            .push(if params.is_descending() { " DESC" } else { " ASC" });

        if let Some((limit, offset)) = params.limit_offset(default_page_size) {
            builder
                .push(" LIMIT ")
                .push_bind(limit)
                .push(" OFFSET ")
                .push_bind(offset);
        }

        Ok(builder)
    }

    /// Arma el COUNT con el mismo predicado y sin paginar
    pub fn count_query<'q, F: ListFilter>(&self, filter: &F) -> AppResult<QueryBuilder<'q, Postgres>> {
        let mut conditions = Conditions::new(self.count);
        filter.apply(&mut conditions)?;
        Ok(conditions.into_builder())
    }

    /// Ejecuta el listado: filas de la página y total filtrado
    pub async fn fetch_page<T, F>(
        &self,
        pool: &PgPool,
        filter: &F,
        params: &ListParams,
        default_page_size: i64,
    ) -> AppResult<Page<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        F: ListFilter,
    {
        let mut count = self.count_query(filter)?;
        let (total,) = count.build_query_as::<(i64,)>().fetch_one(pool).await?;

        let mut data = self.data_query(filter, params, default_page_size)?;
        let rows = data.build_query_as::<T>().fetch_all(pool).await?;

        Ok(Page { data: rows, total })
    }
}

/// SET acumulativo para `UPDATE ... WHERE id = $n`
pub struct Assignments<'q> {
    builder: QueryBuilder<'q, Postgres>,
    count: usize,
}

impl<'q> Assignments<'q> {
    pub fn new(table: &str) -> Self {
        Self {
            builder: QueryBuilder::new(format!("UPDATE {} SET ", table)),
            count: 0,
        }
    }

    fn next_column(&mut self, column: &str) -> &mut QueryBuilder<'q, Postgres> {
        if self.count > 0 {
            self.builder.push(", ");
        }
        self.count += 1;
        self.builder.push(column).push(" = ")
    }

    /// Columna NOT NULL: se actualiza sólo si viene el valor
    pub fn set<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'q + Encode<'q, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.next_column(column).push_bind(value);
        }
        self
    }

    /// Columna nullable: `null` explícito la limpia
    pub fn set_patch<T>(&mut self, column: &str, value: Patch<T>) -> &mut Self
    where
        T: 'q + Encode<'q, Postgres> + Type<Postgres> + Send,
    {
        match value {
            Patch::Missing => {}
            Patch::Null => {
                self.next_column(column).push("NULL");
            }
            Patch::Value(value) => {
                self.next_column(column).push_bind(value);
            }
        }
        self
    }

    fn finish(&mut self, id: i32) {
        if self.count == 0 {
            // Sin cambios: igual se verifica que la fila exista
            self.builder.push("id = id");
        }
        self.builder.push(" WHERE id = ").push_bind(id);
    }

    pub fn sql_for(mut self, id: i32) -> String {
        self.finish(id);
        self.builder.sql().to_string()
    }

    /// Ejecuta el UPDATE y devuelve las filas afectadas
    pub async fn execute(mut self, pool: &PgPool, id: i32) -> AppResult<u64> {
        self.finish(id);
        let result = self.builder.build().execute(pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FiltroPrueba {
        pedido_id: Option<i32>,
        nombre: Option<String>,
        fecha: Option<NaiveDate>,
    }

    impl ListFilter for FiltroPrueba {
        fn apply(&self, conditions: &mut Conditions<'_>) -> AppResult<()> {
            conditions
                .eq("e.pedido_id", self.pedido_id)
                .contains("c.nombre", self.nombre.as_deref())
                .on_date("e.fecha_entrega", self.fecha);
            Ok(())
        }
    }

    const QUERY: ListQuery = ListQuery {
        select: "SELECT e.* FROM entregas e",
        count: "SELECT COUNT(*) FROM entregas e",
        sort: SortSpec {
            columns: &[("numero_entrega", "e.numero_entrega"), ("fecha_entrega", "e.fecha_entrega")],
            default: "e.id",
        },
    };

    fn filtro_vacio() -> FiltroPrueba {
        FiltroPrueba { pedido_id: None, nombre: None, fecha: None }
    }

    #[test]
    fn test_sort_resolution_whitelist() {
        assert_eq!(QUERY.sort.resolve(Some("numero_entrega")), "e.numero_entrega");
        assert_eq!(QUERY.sort.resolve(Some("id; DROP TABLE entregas")), "e.id");
        assert_eq!(QUERY.sort.resolve(None), "e.id");
    }

    #[test]
    fn test_conditions_chain() {
        let filtro = FiltroPrueba {
            pedido_id: Some(7),
            nombre: Some("  acme ".into()),
            fecha: NaiveDate::from_ymd_opt(2024, 5, 3),
        };
        let count = QUERY.count_query(&filtro).unwrap();
        assert_eq!(
            count.sql(),
            "SELECT COUNT(*) FROM entregas e WHERE e.pedido_id = $1 AND c.nombre ILIKE $2 AND e.fecha_entrega::date = $3"
        );
    }

    #[test]
    fn test_empty_filter_has_no_where() {
        let count = QUERY.count_query(&filtro_vacio()).unwrap();
        assert_eq!(count.sql(), "SELECT COUNT(*) FROM entregas e");

        let blank = FiltroPrueba { nombre: Some("   ".into()), ..filtro_vacio() };
        assert_eq!(QUERY.count_query(&blank).unwrap().sql(), "SELECT COUNT(*) FROM entregas e");
    }

    #[test]
    fn test_data_query_paginated() {
        let params = ListParams {
            page: Some(2),
            page_size: Some("5".into()),
            sort_by: Some("fecha_entrega".into()),
            sort_order: Some("desc".into()),
        };
        let data = QUERY.data_query(&filtro_vacio(), &params, 10).unwrap();
        assert_eq!(
            data.sql(),
            "SELECT e.* FROM entregas e ORDER BY e.fecha_entrega DESC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_data_query_page_size_zero_has_no_limit() {
        let params = ListParams { page_size: Some("0".into()), ..Default::default() };
        let data = QUERY.data_query(&filtro_vacio(), &params, 10).unwrap();
        assert_eq!(data.sql(), "SELECT e.* FROM entregas e ORDER BY e.id ASC");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }

    #[test]
    fn test_assignments() {
        let mut set = Assignments::new("entregas");
        set.set("cant_bultos", Some(4))
            .set::<i32>("ok", None)
            .set_patch::<i32>("transporte_id", Patch::Null)
            .set_patch("observaciones", Patch::Value("frágil".to_string()))
            .set_patch::<String>("direccion_entrega", Patch::Missing);
        assert_eq!(
            set.sql_for(9),
            "UPDATE entregas SET cant_bultos = $1, transporte_id = NULL, observaciones = $2 WHERE id = $3"
        );
    }

    #[test]
    fn test_empty_assignments_still_target_row() {
        let set = Assignments::new("clientes");
        assert_eq!(set.sql_for(1), "UPDATE clientes SET id = id WHERE id = $1");
    }
}

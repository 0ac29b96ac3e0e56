use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::dto::common_dto::{ListParams, Page};
use crate::dto::entrega_dto::EntregaFiltro;
use crate::models::entrega::{Entrega, EntregaCambios, EntregaCreada, NuevaEntrega};
use crate::models::pedido::PedidoCapacidad;
use crate::repositories::query::{Assignments, Conditions, ListFilter, ListQuery, SortSpec};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::parse_fecha;

/// Operaciones de persistencia que usan las reglas de consistencia
/// pedido/entregas.
#[async_trait]
pub trait EntregaStore: Send + Sync {
    async fn find_pedido(&self, pedido_id: i32) -> AppResult<Option<PedidoCapacidad>>;

    async fn find_entrega(&self, id: i32) -> AppResult<Option<Entrega>>;

    /// Suma de bultos de las entregas del pedido, opcionalmente sin contar una
    async fn sum_bultos(&self, pedido_id: i32, excluir: Option<i32>) -> AppResult<i64>;

    /// Inserta la entrega con el próximo `numero_entrega` del pedido. Nunca
    /// repite números, aunque se hayan borrado entregas, y un alta fallida no
    /// consume número.
    async fn insert(&self, nueva: NuevaEntrega) -> AppResult<EntregaCreada>;

    async fn update(&self, id: i32, cambios: EntregaCambios) -> AppResult<()>;

    async fn set_completado(&self, id: i32, completado: bool) -> AppResult<()>;

    /// Bandera `completado` de cada entrega del pedido
    async fn estados_completado(&self, pedido_id: i32) -> AppResult<Vec<bool>>;

    /// Fija `completado` del pedido. Al completar conserva una
    /// `fecha_completado` previa o usa `hoy`; al reabrir la limpia.
    async fn set_pedido_completado(
        &self,
        pedido_id: i32,
        completado: bool,
        hoy: NaiveDate,
    ) -> AppResult<()>;
}

const SELECT_ENTREGA: &str = r#"
    SELECT e.id, e.pedido_id, e.numero_entrega, e.cant_bultos, e.direccion_entrega,
           e.armador_id, e.tipo_transporte_id, e.transporte_id, e.estado_id,
           e.fecha_entrega, e.observaciones, e.completado, e.ok, e.created_at,
           p.comprobante,
           NULLIF(TRIM(CONCAT_WS(' ', a.nombre, a.apellido)), '') AS armador_nombre,
           t.nombre AS transporte_nombre,
           s.nombre AS estado_nombre
    FROM entregas e
    JOIN pedidos p ON p.id = e.pedido_id
    LEFT JOIN armadores a ON a.id = e.armador_id
    LEFT JOIN transportes t ON t.id = e.transporte_id
    LEFT JOIN estados s ON s.id = e.estado_id"#;

const LIST_ENTREGAS: ListQuery = ListQuery {
    select: SELECT_ENTREGA,
    count: "SELECT COUNT(*) FROM entregas e",
    sort: SortSpec {
        columns: &[
            ("id", "e.id"),
            ("pedido_id", "e.pedido_id"),
            ("numero_entrega", "e.numero_entrega"),
            ("cant_bultos", "e.cant_bultos"),
            ("fecha_entrega", "e.fecha_entrega"),
            ("completado", "e.completado"),
            ("created_at", "e.created_at"),
        ],
        default: "e.id",
    },
};

impl ListFilter for EntregaFiltro {
    fn apply(&self, conditions: &mut Conditions<'_>) -> AppResult<()> {
        let fecha = parse_fecha("fecha_entrega", self.fecha_entrega.as_deref())?;
        conditions
            .eq("e.pedido_id", self.pedido_id)
            .eq("e.completado", self.completado)
            .eq("e.transporte_id", self.transporte_id)
            .eq("e.armador_id", self.armador_id)
            .eq("e.estado_id", self.estado_id)
            .on_date("e.fecha_entrega", fecha);
        Ok(())
    }
}

pub struct EntregaRepository {
    pool: PgPool,
}

impl EntregaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filtro: &EntregaFiltro,
        params: &ListParams,
        default_page_size: i64,
    ) -> AppResult<Page<Entrega>> {
        LIST_ENTREGAS
            .fetch_page(&self.pool, filtro, params, default_page_size)
            .await
    }

    pub async fn find_by_pedido(&self, pedido_id: i32) -> AppResult<Vec<Entrega>> {
        let query = format!("{} WHERE e.pedido_id = $1 ORDER BY e.numero_entrega ASC", SELECT_ENTREGA);
        let entregas = sqlx::query_as::<_, Entrega>(&query)
            .bind(pedido_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entregas)
    }

    pub async fn set_ok(&self, id: i32, ok: bool) -> AppResult<()> {
        let result = sqlx::query("UPDATE entregas SET ok = $2 WHERE id = $1")
            .bind(id)
            .bind(ok)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Entrega", id));
        }
        Ok(())
    }

    /// Borra la entrega sin recalcular el estado del pedido
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM entregas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Entrega", id));
        }
        Ok(())
    }
}

#[async_trait]
impl EntregaStore for EntregaRepository {
    async fn find_pedido(&self, pedido_id: i32) -> AppResult<Option<PedidoCapacidad>> {
        let pedido = sqlx::query_as::<_, PedidoCapacidad>(
            "SELECT id, cant_bultos, completado FROM pedidos WHERE id = $1",
        )
        .bind(pedido_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pedido)
    }

    async fn find_entrega(&self, id: i32) -> AppResult<Option<Entrega>> {
        let query = format!("{} WHERE e.id = $1", SELECT_ENTREGA);
        let entrega = sqlx::query_as::<_, Entrega>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entrega)
    }

    async fn sum_bultos(&self, pedido_id: i32, excluir: Option<i32>) -> AppResult<i64> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(cant_bultos), 0)::BIGINT
            FROM entregas
            WHERE pedido_id = $1 AND ($2::INT IS NULL OR id <> $2)
            "#,
        )
        .bind(pedido_id)
        .bind(excluir)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn insert(&self, nueva: NuevaEntrega) -> AppResult<EntregaCreada> {
        // Contador e insert en una sola sentencia: si el insert falla, el
        // contador del pedido no avanza
        let creada: Option<EntregaCreada> = sqlx::query_as(
            r#"
            WITH numero AS (
                UPDATE pedidos
                SET ultimo_numero_entrega = GREATEST(
                        ultimo_numero_entrega,
                        (SELECT COALESCE(MAX(numero_entrega), 0) FROM entregas WHERE pedido_id = $1)
                    ) + 1
                WHERE id = $1
                RETURNING ultimo_numero_entrega
            )
            INSERT INTO entregas (
                pedido_id, numero_entrega, cant_bultos, direccion_entrega, armador_id,
                tipo_transporte_id, transporte_id, estado_id, fecha_entrega, observaciones,
                completado, ok
            )
            SELECT $1, numero.ultimo_numero_entrega, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11
            FROM numero
            RETURNING id, numero_entrega
            "#,
        )
        .bind(nueva.pedido_id)
        .bind(nueva.cant_bultos)
        .bind(nueva.direccion_entrega)
        .bind(nueva.armador_id)
        .bind(nueva.tipo_transporte_id)
        .bind(nueva.transporte_id)
        .bind(nueva.estado_id)
        .bind(nueva.fecha_entrega)
        .bind(nueva.observaciones)
        .bind(nueva.completado)
        .bind(nueva.ok)
        .fetch_optional(&self.pool)
        .await?;

        creada.ok_or_else(|| not_found_error("Pedido", nueva.pedido_id))
    }

    async fn update(&self, id: i32, cambios: EntregaCambios) -> AppResult<()> {
        let mut set = Assignments::new("entregas");
        set.set("cant_bultos", cambios.cant_bultos)
            .set_patch("direccion_entrega", cambios.direccion_entrega)
            .set_patch("armador_id", cambios.armador_id)
            .set_patch("tipo_transporte_id", cambios.tipo_transporte_id)
            .set_patch("transporte_id", cambios.transporte_id)
            .set_patch("estado_id", cambios.estado_id)
            .set_patch("fecha_entrega", cambios.fecha_entrega)
            .set_patch("observaciones", cambios.observaciones)
            .set("completado", cambios.completado)
            .set("ok", cambios.ok);

        if set.execute(&self.pool, id).await? == 0 {
            return Err(not_found_error("Entrega", id));
        }
        Ok(())
    }

    async fn set_completado(&self, id: i32, completado: bool) -> AppResult<()> {
        let result = sqlx::query("UPDATE entregas SET completado = $2 WHERE id = $1")
            .bind(id)
            .bind(completado)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Entrega", id));
        }
        Ok(())
    }

    async fn estados_completado(&self, pedido_id: i32) -> AppResult<Vec<bool>> {
        let estados = sqlx::query_scalar::<_, bool>(
            "SELECT completado FROM entregas WHERE pedido_id = $1 ORDER BY numero_entrega",
        )
        .bind(pedido_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(estados)
    }

    async fn set_pedido_completado(
        &self,
        pedido_id: i32,
        completado: bool,
        hoy: NaiveDate,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE pedidos
            SET completado = $2,
                fecha_completado = CASE WHEN $2 THEN COALESCE(fecha_completado, $3) ELSE NULL END
            WHERE id = $1
            "#,
        )
        .bind(pedido_id)
        .bind(completado)
        .bind(hoy)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Pedido", pedido_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entrega_filter_sql() {
        let filtro = EntregaFiltro {
            pedido_id: Some(3),
            completado: Some(false),
            fecha_entrega: Some("2024-05-03T00:00:00.000Z".into()),
            ..Default::default()
        };
        let count = LIST_ENTREGAS.count_query(&filtro).unwrap();
        assert_eq!(
            count.sql(),
            "SELECT COUNT(*) FROM entregas e WHERE e.pedido_id = $1 AND e.completado = $2 AND e.fecha_entrega::date = $3"
        );
    }

    #[test]
    fn test_entrega_filter_rejects_bad_date() {
        let filtro = EntregaFiltro {
            fecha_entrega: Some("ayer".into()),
            ..Default::default()
        };
        assert!(LIST_ENTREGAS.count_query(&filtro).is_err());
    }
}

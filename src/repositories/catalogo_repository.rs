//! Repositorios de catálogos
//!
//! Clientes, armadores, vendedores, transportes, tipos de transporte y
//! estados: CRUD sobre una sola tabla cada uno, detrás del trait [`Catalogo`].

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::PgRow, FromRow, PgPool};
use validator::Validate;

use crate::dto::catalogo_dto::*;
use crate::dto::common_dto::{ListParams, Page};
use crate::models::catalogo::{Armador, Cliente, Estado, TipoTransporte, Transporte, Vendedor};
use crate::repositories::query::{Assignments, Conditions, ListFilter, ListQuery, SortSpec};
use crate::utils::errors::{not_found_error, AppResult};

/// Tabla de catálogo con CRUD completo
#[async_trait]
pub trait Catalogo: Send + Sync + Sized + 'static {
    /// Nombre del recurso para los mensajes de error
    const RECURSO: &'static str;
    const TABLA: &'static str;
    const LISTADO: ListQuery;

    type Fila: Serialize + for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static;
    type Filtro: ListFilter + DeserializeOwned + Send + Sync + 'static;
    type Alta: DeserializeOwned + Validate + Send + 'static;
    type Cambios: DeserializeOwned + Validate + Send + 'static;

    fn new(pool: PgPool) -> Self;

    fn pool(&self) -> &PgPool;

    /// SET del UPDATE a partir de los campos enviados
    fn assignments(cambios: Self::Cambios) -> Assignments<'static>;

    async fn create(&self, alta: Self::Alta) -> AppResult<i32>;

    async fn list(
        &self,
        filtro: &Self::Filtro,
        params: &ListParams,
        default_page_size: i64,
    ) -> AppResult<Page<Self::Fila>> {
        Self::LISTADO
            .fetch_page(self.pool(), filtro, params, default_page_size)
            .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Self::Fila>> {
        let query = format!("SELECT * FROM {} WHERE id = $1", Self::TABLA);
        let fila = sqlx::query_as::<_, Self::Fila>(&query)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(fila)
    }

    async fn update(&self, id: i32, cambios: Self::Cambios) -> AppResult<()> {
        if Self::assignments(cambios).execute(self.pool(), id).await? == 0 {
            return Err(not_found_error(Self::RECURSO, id));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let query = format!("DELETE FROM {} WHERE id = $1", Self::TABLA);
        let result = sqlx::query(&query).bind(id).execute(self.pool()).await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error(Self::RECURSO, id));
        }
        Ok(())
    }
}

impl ListFilter for ClienteFiltro {
    fn apply(&self, conditions: &mut Conditions<'_>) -> AppResult<()> {
        conditions
            .contains("nombre", self.nombre.as_deref())
            .contains("codigo", self.codigo.as_deref())
            .contains("localidad", self.localidad.as_deref());
        Ok(())
    }
}

impl ListFilter for CatalogoFiltro {
    fn apply(&self, conditions: &mut Conditions<'_>) -> AppResult<()> {
        conditions
            .contains("nombre", self.nombre.as_deref())
            .eq("activo", self.activo);
        Ok(())
    }
}

impl ListFilter for NombreFiltro {
    fn apply(&self, conditions: &mut Conditions<'_>) -> AppResult<()> {
        conditions.contains("nombre", self.nombre.as_deref());
        Ok(())
    }
}

const NOMBRE_SORT: &[(&str, &str)] = &[("id", "id"), ("nombre", "nombre")];
const PERSONA_SORT: &[(&str, &str)] = &[("id", "id"), ("nombre", "nombre"), ("apellido", "apellido")];

pub struct ClienteRepository {
    pool: PgPool,
}

#[async_trait]
impl Catalogo for ClienteRepository {
    const RECURSO: &'static str = "Cliente";
    const TABLA: &'static str = "clientes";
    const LISTADO: ListQuery = ListQuery {
        select: "SELECT * FROM clientes",
        count: "SELECT COUNT(*) FROM clientes",
        sort: SortSpec {
            columns: &[
                ("id", "id"),
                ("codigo", "codigo"),
                ("nombre", "nombre"),
                ("localidad", "localidad"),
                ("created_at", "created_at"),
            ],
            default: "nombre",
        },
    };

    type Fila = Cliente;
    type Filtro = ClienteFiltro;
    type Alta = CreateClienteRequest;
    type Cambios = UpdateClienteRequest;

    fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn assignments(cambios: UpdateClienteRequest) -> Assignments<'static> {
        let mut set = Assignments::new(Self::TABLA);
        set.set_patch("codigo", cambios.codigo)
            .set("nombre", cambios.nombre.map(|n| n.trim().to_string()))
            .set_patch("direccion", cambios.direccion)
            .set_patch("localidad", cambios.localidad)
            .set_patch("telefono", cambios.telefono)
            .set_patch("email", cambios.email);
        set
    }

    async fn create(&self, alta: CreateClienteRequest) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO clientes (codigo, nombre, direccion, localidad, telefono, email)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(alta.codigo)
        .bind(alta.nombre.trim())
        .bind(alta.direccion)
        .bind(alta.localidad)
        .bind(alta.telefono)
        .bind(alta.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

pub struct ArmadorRepository {
    pool: PgPool,
}

#[async_trait]
impl Catalogo for ArmadorRepository {
    const RECURSO: &'static str = "Armador";
    const TABLA: &'static str = "armadores";
    const LISTADO: ListQuery = ListQuery {
        select: "SELECT * FROM armadores",
        count: "SELECT COUNT(*) FROM armadores",
        sort: SortSpec { columns: PERSONA_SORT, default: "nombre" },
    };

    type Fila = Armador;
    type Filtro = CatalogoFiltro;
    type Alta = CreateArmadorRequest;
    type Cambios = UpdateArmadorRequest;

    fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn assignments(cambios: UpdateArmadorRequest) -> Assignments<'static> {
        let mut set = Assignments::new(Self::TABLA);
        set.set("nombre", cambios.nombre.map(|n| n.trim().to_string()))
            .set_patch("apellido", cambios.apellido)
            .set("activo", cambios.activo);
        set
    }

    async fn create(&self, alta: CreateArmadorRequest) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO armadores (nombre, apellido, activo) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(alta.nombre.trim())
        .bind(alta.apellido)
        .bind(alta.activo.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

pub struct VendedorRepository {
    pool: PgPool,
}

#[async_trait]
impl Catalogo for VendedorRepository {
    const RECURSO: &'static str = "Vendedor";
    const TABLA: &'static str = "vendedores";
    const LISTADO: ListQuery = ListQuery {
        select: "SELECT * FROM vendedores",
        count: "SELECT COUNT(*) FROM vendedores",
        sort: SortSpec { columns: PERSONA_SORT, default: "nombre" },
    };

    type Fila = Vendedor;
    type Filtro = CatalogoFiltro;
    type Alta = CreateVendedorRequest;
    type Cambios = UpdateVendedorRequest;

    fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn assignments(cambios: UpdateVendedorRequest) -> Assignments<'static> {
        let mut set = Assignments::new(Self::TABLA);
        set.set("nombre", cambios.nombre.map(|n| n.trim().to_string()))
            .set_patch("apellido", cambios.apellido)
            .set_patch("email", cambios.email)
            .set_patch("telefono", cambios.telefono)
            .set("activo", cambios.activo);
        set
    }

    async fn create(&self, alta: CreateVendedorRequest) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO vendedores (nombre, apellido, email, telefono, activo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(alta.nombre.trim())
        .bind(alta.apellido)
        .bind(alta.email)
        .bind(alta.telefono)
        .bind(alta.activo.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

pub struct TransporteRepository {
    pool: PgPool,
}

#[async_trait]
impl Catalogo for TransporteRepository {
    const RECURSO: &'static str = "Transporte";
    const TABLA: &'static str = "transportes";
    const LISTADO: ListQuery = ListQuery {
        select: "SELECT * FROM transportes",
        count: "SELECT COUNT(*) FROM transportes",
        sort: SortSpec { columns: NOMBRE_SORT, default: "nombre" },
    };

    type Fila = Transporte;
    type Filtro = CatalogoFiltro;
    type Alta = CreateTransporteRequest;
    type Cambios = UpdateTransporteRequest;

    fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn assignments(cambios: UpdateTransporteRequest) -> Assignments<'static> {
        let mut set = Assignments::new(Self::TABLA);
        set.set("nombre", cambios.nombre.map(|n| n.trim().to_string()))
            .set_patch("telefono", cambios.telefono)
            .set_patch("direccion", cambios.direccion)
            .set("activo", cambios.activo);
        set
    }

    async fn create(&self, alta: CreateTransporteRequest) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO transportes (nombre, telefono, direccion, activo)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(alta.nombre.trim())
        .bind(alta.telefono)
        .bind(alta.direccion)
        .bind(alta.activo.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

pub struct TipoTransporteRepository {
    pool: PgPool,
}

#[async_trait]
impl Catalogo for TipoTransporteRepository {
    const RECURSO: &'static str = "Tipo de transporte";
    const TABLA: &'static str = "tipos_transporte";
    const LISTADO: ListQuery = ListQuery {
        select: "SELECT * FROM tipos_transporte",
        count: "SELECT COUNT(*) FROM tipos_transporte",
        sort: SortSpec { columns: NOMBRE_SORT, default: "nombre" },
    };

    type Fila = TipoTransporte;
    type Filtro = NombreFiltro;
    type Alta = CreateTipoTransporteRequest;
    type Cambios = UpdateTipoTransporteRequest;

    fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn assignments(cambios: UpdateTipoTransporteRequest) -> Assignments<'static> {
        let mut set = Assignments::new(Self::TABLA);
        set.set("nombre", cambios.nombre.map(|n| n.trim().to_string()))
            .set_patch("descripcion", cambios.descripcion);
        set
    }

    async fn create(&self, alta: CreateTipoTransporteRequest) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO tipos_transporte (nombre, descripcion) VALUES ($1, $2) RETURNING id",
        )
        .bind(alta.nombre.trim())
        .bind(alta.descripcion)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

pub struct EstadoRepository {
    pool: PgPool,
}

#[async_trait]
impl Catalogo for EstadoRepository {
    const RECURSO: &'static str = "Estado";
    const TABLA: &'static str = "estados";
    const LISTADO: ListQuery = ListQuery {
        select: "SELECT * FROM estados",
        count: "SELECT COUNT(*) FROM estados",
        sort: SortSpec { columns: NOMBRE_SORT, default: "id" },
    };

    type Fila = Estado;
    type Filtro = NombreFiltro;
    type Alta = CreateEstadoRequest;
    type Cambios = UpdateEstadoRequest;

    fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn assignments(cambios: UpdateEstadoRequest) -> Assignments<'static> {
        let mut set = Assignments::new(Self::TABLA);
        set.set("nombre", cambios.nombre.map(|n| n.trim().to_string()))
            .set_patch("descripcion", cambios.descripcion)
            .set_patch("color", cambios.color);
        set
    }

    async fn create(&self, alta: CreateEstadoRequest) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO estados (nombre, descripcion, color) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(alta.nombre.trim())
        .bind(alta.descripcion)
        .bind(alta.color)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::patch::Patch;

    #[test]
    fn test_catalogo_filter_sql() {
        let filtro = CatalogoFiltro {
            nombre: Some("ana".into()),
            activo: Some(true),
        };
        let count = ArmadorRepository::LISTADO.count_query(&filtro).unwrap();
        assert_eq!(
            count.sql(),
            "SELECT COUNT(*) FROM armadores WHERE nombre ILIKE $1 AND activo = $2"
        );
    }

    #[test]
    fn test_cliente_default_sort() {
        let data = ClienteRepository::LISTADO
            .data_query(&ClienteFiltro::default(), &ListParams::default(), 10)
            .unwrap();
        assert_eq!(data.sql(), "SELECT * FROM clientes ORDER BY nombre ASC LIMIT $1 OFFSET $2");
    }

    #[test]
    fn test_estado_assignments() {
        let cambios = UpdateEstadoRequest {
            nombre: Some(" Entregado ".into()),
            color: Patch::Null,
            ..Default::default()
        };
        assert_eq!(
            EstadoRepository::assignments(cambios).sql_for(4),
            "UPDATE estados SET nombre = $1, color = NULL WHERE id = $2"
        );
    }
}

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::common_dto::{ListParams, Page};
use crate::dto::devolucion_dto::DevolucionFiltro;
use crate::models::devolucion::Devolucion;
use crate::repositories::query::{Assignments, Conditions, ListFilter, ListQuery, SortSpec};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::patch::Patch;
use crate::utils::validation::parse_fecha;

const SELECT_DEVOLUCION: &str = r#"
    SELECT d.id, d.pedido_id, d.cliente_id, d.tipo, d.descripcion, d.monto, d.fecha,
           d.transporte_id, d.estado_id, d.observaciones, d.recibido, d.completado,
           d.en_logistica, d.ok, d.created_at,
           p.comprobante,
           c.nombre AS cliente_nombre
    FROM devoluciones d
    LEFT JOIN pedidos p ON p.id = d.pedido_id
    LEFT JOIN clientes c ON c.id = d.cliente_id"#;

const LIST_DEVOLUCIONES: ListQuery = ListQuery {
    select: SELECT_DEVOLUCION,
    count: "SELECT COUNT(*) FROM devoluciones d",
    sort: SortSpec {
        columns: &[
            ("id", "d.id"),
            ("tipo", "d.tipo"),
            ("fecha", "d.fecha"),
            ("monto", "d.monto"),
            ("recibido", "d.recibido"),
            ("completado", "d.completado"),
            ("created_at", "d.created_at"),
        ],
        default: "d.id",
    },
};

impl ListFilter for DevolucionFiltro {
    fn apply(&self, conditions: &mut Conditions<'_>) -> AppResult<()> {
        let fecha = parse_fecha("fecha", self.fecha.as_deref())?;
        conditions
            .eq("d.pedido_id", self.pedido_id)
            .eq("d.cliente_id", self.cliente_id)
            .eq("d.tipo", self.tipo.clone())
            .eq("d.recibido", self.recibido)
            .eq("d.completado", self.completado)
            .eq("d.en_logistica", self.en_logistica)
            .on_date("d.fecha", fecha);
        Ok(())
    }
}

/// Alta de devolución ya normalizada
#[derive(Debug, Default)]
pub struct NuevaDevolucion {
    pub pedido_id: Option<i32>,
    pub cliente_id: Option<i32>,
    pub tipo: String,
    pub descripcion: Option<String>,
    pub monto: Option<Decimal>,
    pub fecha: Option<NaiveDate>,
    pub transporte_id: Option<i32>,
    pub estado_id: Option<i32>,
    pub observaciones: Option<String>,
    pub recibido: bool,
    pub en_logistica: bool,
}

#[derive(Debug, Default)]
pub struct DevolucionCambios {
    pub pedido_id: Patch<i32>,
    pub cliente_id: Patch<i32>,
    pub tipo: Option<String>,
    pub descripcion: Patch<String>,
    pub monto: Patch<Decimal>,
    pub fecha: Patch<NaiveDate>,
    pub transporte_id: Patch<i32>,
    pub estado_id: Patch<i32>,
    pub observaciones: Patch<String>,
    pub recibido: Option<bool>,
    pub completado: Option<bool>,
    pub en_logistica: Option<bool>,
    pub ok: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DevolucionFlag {
    EnLogistica,
    Recibido,
    Completado,
    Ok,
}

impl DevolucionFlag {
    fn as_column(self) -> &'static str {
        match self {
            DevolucionFlag::EnLogistica => "en_logistica",
            DevolucionFlag::Recibido => "recibido",
            DevolucionFlag::Completado => "completado",
            DevolucionFlag::Ok => "ok",
        }
    }
}

pub struct DevolucionRepository {
    pool: PgPool,
}

impl DevolucionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filtro: &DevolucionFiltro,
        params: &ListParams,
        default_page_size: i64,
    ) -> AppResult<Page<Devolucion>> {
        LIST_DEVOLUCIONES
            .fetch_page(&self.pool, filtro, params, default_page_size)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Devolucion>> {
        let query = format!("{} WHERE d.id = $1", SELECT_DEVOLUCION);
        let devolucion = sqlx::query_as::<_, Devolucion>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(devolucion)
    }

    pub async fn find_en_logistica(&self) -> AppResult<Vec<Devolucion>> {
        let query = format!(
            "{} WHERE d.en_logistica = TRUE ORDER BY d.fecha ASC NULLS LAST, d.id ASC",
            SELECT_DEVOLUCION
        );
        let devoluciones = sqlx::query_as::<_, Devolucion>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(devoluciones)
    }

    pub async fn create(&self, nueva: NuevaDevolucion) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO devoluciones (
                pedido_id, cliente_id, tipo, descripcion, monto, fecha, transporte_id,
                estado_id, observaciones, recibido, en_logistica
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(nueva.pedido_id)
        .bind(nueva.cliente_id)
        .bind(nueva.tipo)
        .bind(nueva.descripcion)
        .bind(nueva.monto)
        .bind(nueva.fecha)
        .bind(nueva.transporte_id)
        .bind(nueva.estado_id)
        .bind(nueva.observaciones)
        .bind(nueva.recibido)
        .bind(nueva.en_logistica)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update(&self, id: i32, cambios: DevolucionCambios) -> AppResult<()> {
        let mut set = Assignments::new("devoluciones");
        set.set_patch("pedido_id", cambios.pedido_id)
            .set_patch("cliente_id", cambios.cliente_id)
            .set("tipo", cambios.tipo)
            .set_patch("descripcion", cambios.descripcion)
            .set_patch("monto", cambios.monto)
            .set_patch("fecha", cambios.fecha)
            .set_patch("transporte_id", cambios.transporte_id)
            .set_patch("estado_id", cambios.estado_id)
            .set_patch("observaciones", cambios.observaciones)
            .set("recibido", cambios.recibido)
            .set("completado", cambios.completado)
            .set("en_logistica", cambios.en_logistica)
            .set("ok", cambios.ok);

        if set.execute(&self.pool, id).await? == 0 {
            return Err(not_found_error("Devolución", id));
        }
        Ok(())
    }

    pub async fn set_flag(&self, id: i32, flag: DevolucionFlag, value: bool) -> AppResult<()> {
        let mut set = Assignments::new("devoluciones");
        set.set(flag.as_column(), Some(value));

        if set.execute(&self.pool, id).await? == 0 {
            return Err(not_found_error("Devolución", id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM devoluciones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Devolución", id));
        }
        Ok(())
    }
}

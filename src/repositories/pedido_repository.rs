use chrono::NaiveDate;
use sqlx::PgPool;

use crate::dto::common_dto::{ListParams, Page};
use crate::dto::pedido_dto::PedidoFiltro;
use crate::models::pedido::{NuevoPedido, Pedido};
use crate::repositories::query::{Assignments, Conditions, ListFilter, ListQuery, SortSpec};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::patch::Patch;
use crate::utils::validation::parse_fecha;

const SELECT_PEDIDO: &str = r#"
    SELECT p.id, p.comprobante, p.cliente_id, p.direccion_entrega, p.armador_id,
           p.tipo_transporte_id, p.transporte_id, p.vendedor_id, p.cant_bultos,
           p.tipo_bultos, p.fecha_pedido, p.fecha_entrega, p.estado_id, p.observaciones,
           p.completado, p.fecha_completado, p.en_logistica, p.ok, p.created_at,
           c.nombre AS cliente_nombre,
           s.nombre AS estado_nombre,
           t.nombre AS transporte_nombre,
           COALESCE((SELECT SUM(e.cant_bultos) FROM entregas e WHERE e.pedido_id = p.id), 0)::BIGINT
               AS bultos_entregados
    FROM pedidos p
    LEFT JOIN clientes c ON c.id = p.cliente_id
    LEFT JOIN estados s ON s.id = p.estado_id
    LEFT JOIN transportes t ON t.id = p.transporte_id"#;

const LIST_PEDIDOS: ListQuery = ListQuery {
    select: SELECT_PEDIDO,
    count: "SELECT COUNT(*) FROM pedidos p LEFT JOIN clientes c ON c.id = p.cliente_id",
    sort: SortSpec {
        columns: &[
            ("id", "p.id"),
            ("comprobante", "p.comprobante"),
            ("cliente", "c.nombre"),
            ("cant_bultos", "p.cant_bultos"),
            ("fecha_pedido", "p.fecha_pedido"),
            ("fecha_entrega", "p.fecha_entrega"),
            ("completado", "p.completado"),
            ("created_at", "p.created_at"),
        ],
        default: "p.id",
    },
};

impl ListFilter for PedidoFiltro {
    fn apply(&self, conditions: &mut Conditions<'_>) -> AppResult<()> {
        let fecha_pedido = parse_fecha("fecha_pedido", self.fecha_pedido.as_deref())?;
        let fecha_entrega = parse_fecha("fecha_entrega", self.fecha_entrega.as_deref())?;
        conditions
            .contains("p.comprobante", self.comprobante.as_deref())
            .contains("c.nombre", self.cliente.as_deref())
            .eq("p.cliente_id", self.cliente_id)
            .eq("p.armador_id", self.armador_id)
            .eq("p.transporte_id", self.transporte_id)
            .eq("p.tipo_transporte_id", self.tipo_transporte_id)
            .eq("p.vendedor_id", self.vendedor_id)
            .eq("p.estado_id", self.estado_id)
            .eq("p.completado", self.completado)
            .eq("p.en_logistica", self.en_logistica)
            .eq("p.ok", self.ok)
            .on_date("p.fecha_pedido", fecha_pedido)
            .on_date("p.fecha_entrega", fecha_entrega);
        Ok(())
    }
}

/// Cambios de un pedido ya normalizados
#[derive(Debug, Default)]
pub struct PedidoCambios {
    pub comprobante: Option<String>,
    pub cliente_id: Patch<i32>,
    pub direccion_entrega: Patch<String>,
    pub armador_id: Patch<i32>,
    pub tipo_transporte_id: Patch<i32>,
    pub transporte_id: Patch<i32>,
    pub vendedor_id: Patch<i32>,
    pub cant_bultos: Option<i32>,
    pub tipo_bultos: Patch<String>,
    pub fecha_pedido: Patch<NaiveDate>,
    pub fecha_entrega: Patch<NaiveDate>,
    pub estado_id: Patch<i32>,
    pub observaciones: Patch<String>,
    pub en_logistica: Option<bool>,
    pub ok: Option<bool>,
}

pub struct PedidoRepository {
    pool: PgPool,
}

impl PedidoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filtro: &PedidoFiltro,
        params: &ListParams,
        default_page_size: i64,
    ) -> AppResult<Page<Pedido>> {
        LIST_PEDIDOS
            .fetch_page(&self.pool, filtro, params, default_page_size)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Pedido>> {
        let query = format!("{} WHERE p.id = $1", SELECT_PEDIDO);
        let pedido = sqlx::query_as::<_, Pedido>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(pedido)
    }

    /// Pedidos marcados para la planilla de logística
    pub async fn find_en_logistica(&self) -> AppResult<Vec<Pedido>> {
        let query = format!(
            "{} WHERE p.en_logistica = TRUE ORDER BY p.fecha_entrega ASC NULLS LAST, p.id ASC",
            SELECT_PEDIDO
        );
        let pedidos = sqlx::query_as::<_, Pedido>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(pedidos)
    }

    pub async fn create(&self, nuevo: NuevoPedido) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO pedidos (
                comprobante, cliente_id, direccion_entrega, armador_id, tipo_transporte_id,
                transporte_id, vendedor_id, cant_bultos, tipo_bultos, fecha_pedido,
                fecha_entrega, estado_id, observaciones, en_logistica
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(nuevo.comprobante)
        .bind(nuevo.cliente_id)
        .bind(nuevo.direccion_entrega)
        .bind(nuevo.armador_id)
        .bind(nuevo.tipo_transporte_id)
        .bind(nuevo.transporte_id)
        .bind(nuevo.vendedor_id)
        .bind(nuevo.cant_bultos)
        .bind(nuevo.tipo_bultos)
        .bind(nuevo.fecha_pedido)
        .bind(nuevo.fecha_entrega)
        .bind(nuevo.estado_id)
        .bind(nuevo.observaciones)
        .bind(nuevo.en_logistica)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn update(&self, id: i32, cambios: PedidoCambios) -> AppResult<()> {
        let mut set = Assignments::new("pedidos");
        set.set("comprobante", cambios.comprobante)
            .set_patch("cliente_id", cambios.cliente_id)
            .set_patch("direccion_entrega", cambios.direccion_entrega)
            .set_patch("armador_id", cambios.armador_id)
            .set_patch("tipo_transporte_id", cambios.tipo_transporte_id)
            .set_patch("transporte_id", cambios.transporte_id)
            .set_patch("vendedor_id", cambios.vendedor_id)
            .set("cant_bultos", cambios.cant_bultos)
            .set_patch("tipo_bultos", cambios.tipo_bultos)
            .set_patch("fecha_pedido", cambios.fecha_pedido)
            .set_patch("fecha_entrega", cambios.fecha_entrega)
            .set_patch("estado_id", cambios.estado_id)
            .set_patch("observaciones", cambios.observaciones)
            .set("en_logistica", cambios.en_logistica)
            .set("ok", cambios.ok);

        if set.execute(&self.pool, id).await? == 0 {
            return Err(not_found_error("Pedido", id));
        }
        Ok(())
    }

    /// Cambia una bandera simple (`en_logistica`, `ok`) sin efectos laterales
    pub async fn set_flag(&self, id: i32, flag: PedidoFlag, value: bool) -> AppResult<()> {
        let mut set = Assignments::new("pedidos");
        set.set(flag.as_column(), Some(value));

        if set.execute(&self.pool, id).await? == 0 {
            return Err(not_found_error("Pedido", id));
        }
        Ok(())
    }

    /// Borra el pedido; sus entregas se borran en cascada
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM pedidos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Pedido", id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PedidoFlag {
    EnLogistica,
    Ok,
}

impl PedidoFlag {
    fn as_column(self) -> &'static str {
        match self {
            PedidoFlag::EnLogistica => "en_logistica",
            PedidoFlag::Ok => "ok",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pedido_filter_joins_cliente() {
        let filtro = PedidoFiltro {
            cliente: Some("Ferretería".into()),
            en_logistica: Some(true),
            fecha_pedido: Some("2024-02-01".into()),
            ..Default::default()
        };
        let count = LIST_PEDIDOS.count_query(&filtro).unwrap();
        assert_eq!(
            count.sql(),
            "SELECT COUNT(*) FROM pedidos p LEFT JOIN clientes c ON c.id = p.cliente_id \
             WHERE c.nombre ILIKE $1 AND p.en_logistica = $2 AND p.fecha_pedido::date = $3"
        );
    }

    #[test]
    fn test_pedido_sort_by_cliente() {
        let params = ListParams {
            sort_by: Some("cliente".into()),
            page_size: Some("all".into()),
            ..Default::default()
        };
        let data = LIST_PEDIDOS
            .data_query(&PedidoFiltro::default(), &params, 10)
            .unwrap();
        assert!(data.sql().ends_with("ORDER BY c.nombre ASC"));
    }
}

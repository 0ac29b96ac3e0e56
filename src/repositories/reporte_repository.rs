//! Consultas agregadas para los reportes
//!
//! Todas aceptan un rango opcional `desde`/`hasta` (días inclusive).

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::reporte::{Agrupado, ResumenGeneral};
use crate::repositories::query::Conditions;
use crate::utils::errors::AppResult;

const RESUMEN: &str = r#"
    WITH p AS (
        SELECT completado, en_logistica FROM pedidos
        WHERE ($1::date IS NULL OR fecha_pedido >= $1) AND ($2::date IS NULL OR fecha_pedido <= $2)
    ),
    e AS (
        SELECT completado FROM entregas
        WHERE ($1::date IS NULL OR fecha_entrega >= $1) AND ($2::date IS NULL OR fecha_entrega <= $2)
    ),
    d AS (
        SELECT completado FROM devoluciones
        WHERE ($1::date IS NULL OR fecha >= $1) AND ($2::date IS NULL OR fecha <= $2)
    )
    SELECT
        (SELECT COUNT(*) FROM p) AS pedidos_total,
        (SELECT COUNT(*) FROM p WHERE completado) AS pedidos_completados,
        (SELECT COUNT(*) FROM p WHERE NOT completado) AS pedidos_pendientes,
        (SELECT COUNT(*) FROM p WHERE en_logistica) AS pedidos_en_logistica,
        (SELECT COUNT(*) FROM e) AS entregas_total,
        (SELECT COUNT(*) FROM e WHERE completado) AS entregas_completadas,
        (SELECT COUNT(*) FROM d WHERE NOT completado) AS devoluciones_pendientes
"#;

/// Agrupación soportada: (FROM/JOIN, columna de fecha, expresión de etiqueta, bultos)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Agrupacion {
    PedidosPorEstado,
    PedidosPorCliente,
    EntregasPorTransporte,
}

impl Agrupacion {
    fn parts(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Agrupacion::PedidosPorEstado => (
                "pedidos p LEFT JOIN estados s ON s.id = p.estado_id",
                "p.fecha_pedido",
                "s.nombre",
                "p.cant_bultos",
            ),
            Agrupacion::PedidosPorCliente => (
                "pedidos p LEFT JOIN clientes c ON c.id = p.cliente_id",
                "p.fecha_pedido",
                "c.nombre",
                "p.cant_bultos",
            ),
            Agrupacion::EntregasPorTransporte => (
                "entregas e LEFT JOIN transportes t ON t.id = e.transporte_id",
                "e.fecha_entrega",
                "t.nombre",
                "e.cant_bultos",
            ),
        }
    }

    fn query<'q>(self, desde: Option<NaiveDate>, hasta: Option<NaiveDate>) -> QueryBuilder<'q, Postgres> {
        let (from, fecha, etiqueta, bultos) = self.parts();
        let mut conditions = Conditions::new(format!(
            "SELECT {etiqueta} AS etiqueta, COUNT(*) AS cantidad, \
             COALESCE(SUM({bultos}), 0)::BIGINT AS bultos FROM {from}"
        ));
        conditions.between(fecha, desde, hasta);

        let mut builder = conditions.into_builder();
        builder.push(format!(" GROUP BY {etiqueta} ORDER BY cantidad DESC, etiqueta ASC"));
        builder
    }
}

pub struct ReporteRepository {
    pool: PgPool,
}

impl ReporteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn resumen(
        &self,
        desde: Option<NaiveDate>,
        hasta: Option<NaiveDate>,
    ) -> AppResult<ResumenGeneral> {
        let resumen = sqlx::query_as::<_, ResumenGeneral>(RESUMEN)
            .bind(desde)
            .bind(hasta)
            .fetch_one(&self.pool)
            .await?;

        Ok(resumen)
    }

    pub async fn agrupado(
        &self,
        agrupacion: Agrupacion,
        desde: Option<NaiveDate>,
        hasta: Option<NaiveDate>,
    ) -> AppResult<Vec<Agrupado>> {
        let mut query = agrupacion.query(desde, hasta);
        let filas = query.build_query_as::<Agrupado>().fetch_all(&self.pool).await?;
        Ok(filas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agrupado_sin_rango() {
        let query = Agrupacion::PedidosPorEstado.query(None, None);
        assert_eq!(
            query.sql(),
            "SELECT s.nombre AS etiqueta, COUNT(*) AS cantidad, COALESCE(SUM(p.cant_bultos), 0)::BIGINT AS bultos \
             FROM pedidos p LEFT JOIN estados s ON s.id = p.estado_id \
             GROUP BY s.nombre ORDER BY cantidad DESC, etiqueta ASC"
        );
    }

    #[test]
    fn test_agrupado_con_rango() {
        let query = Agrupacion::EntregasPorTransporte.query(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 31),
        );
        assert!(query
            .sql()
            .contains("WHERE e.fecha_entrega::date >= $1 AND e.fecha_entrega::date <= $2 GROUP BY t.nombre"));
    }
}

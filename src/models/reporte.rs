//! Filas de los reportes agregados

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumenGeneral {
    pub pedidos_total: i64,
    pub pedidos_completados: i64,
    pub pedidos_pendientes: i64,
    pub pedidos_en_logistica: i64,
    pub entregas_total: i64,
    pub entregas_completadas: i64,
    pub devoluciones_pendientes: i64,
}

/// Agregado genérico: etiqueta, cantidad de filas y bultos
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Agrupado {
    pub etiqueta: Option<String>,
    pub cantidad: i64,
    pub bultos: i64,
}

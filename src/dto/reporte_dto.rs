use serde::Serialize;

use crate::models::devolucion::Devolucion;
use crate::models::pedido::Pedido;

// Planilla de logística: todo lo marcado `en_logistica`
#[derive(Debug, Serialize)]
pub struct LogisticaResponse {
    pub pedidos: Vec<Pedido>,
    pub devoluciones: Vec<Devolucion>,
}

// Response de GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub environment: String,
}

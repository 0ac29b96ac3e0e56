//! Modelo de Devolución / Cobranza

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

pub const TIPOS_DEVOLUCION: [&str; 2] = ["devolucion", "cobranza"];

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Devolucion {
    pub id: i32,
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
    pub completado: bool,
    pub en_logistica: bool,
    pub ok: bool,
    pub created_at: DateTime<Utc>,
    pub comprobante: Option<String>,
    pub cliente_nombre: Option<String>,
}

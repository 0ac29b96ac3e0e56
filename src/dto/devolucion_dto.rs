use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::patch::Patch;
use crate::utils::validation::{deserialize_id, deserialize_id_patch};

// Request para registrar una devolución o cobranza
#[derive(Debug, Default, Deserialize)]
pub struct CreateDevolucionRequest {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub pedido_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub cliente_id: Option<i32>,
    pub tipo: Option<String>,
    pub descripcion: Option<String>,
    pub monto: Option<Decimal>,
    pub fecha: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub transporte_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub estado_id: Option<i32>,
    pub observaciones: Option<String>,
    #[serde(default)]
    pub recibido: bool,
    #[serde(default)]
    pub en_logistica: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDevolucionRequest {
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub pedido_id: Patch<i32>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub cliente_id: Patch<i32>,
    pub tipo: Option<String>,
    #[serde(default)]
    pub descripcion: Patch<String>,
    #[serde(default)]
    pub monto: Patch<Decimal>,
    #[serde(default)]
    pub fecha: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub transporte_id: Patch<i32>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub estado_id: Patch<i32>,
    #[serde(default)]
    pub observaciones: Patch<String>,
    pub recibido: Option<bool>,
    pub completado: Option<bool>,
    pub en_logistica: Option<bool>,
    pub ok: Option<bool>,
}

// Filtros de GET /devoluciones
#[derive(Debug, Default, Deserialize)]
pub struct DevolucionFiltro {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub pedido_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub cliente_id: Option<i32>,
    pub tipo: Option<String>,
    pub recibido: Option<bool>,
    pub completado: Option<bool>,
    pub en_logistica: Option<bool>,
    pub fecha: Option<String>,
}

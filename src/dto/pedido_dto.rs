use serde::Deserialize;

use crate::utils::patch::Patch;
use crate::utils::validation::{deserialize_bultos, deserialize_id, deserialize_id_patch};

// Request para crear un pedido
#[derive(Debug, Default, Deserialize)]
pub struct CreatePedidoRequest {
    pub comprobante: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub cliente_id: Option<i32>,
    pub direccion_entrega: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub armador_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub tipo_transporte_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub transporte_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub vendedor_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_bultos")]
    pub cant_bultos: Option<i32>,
    pub tipo_bultos: Option<String>,
    pub fecha_pedido: Option<String>,
    pub fecha_entrega: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub estado_id: Option<i32>,
    pub observaciones: Option<String>,
    #[serde(default)]
    pub en_logistica: bool,
}

// Request para actualizar un pedido; `completado` sólo cambia por su endpoint
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePedidoRequest {
    pub comprobante: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub cliente_id: Patch<i32>,
    #[serde(default)]
    pub direccion_entrega: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub armador_id: Patch<i32>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub tipo_transporte_id: Patch<i32>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub transporte_id: Patch<i32>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub vendedor_id: Patch<i32>,
    #[serde(default, deserialize_with = "deserialize_bultos")]
    pub cant_bultos: Option<i32>,
    #[serde(default)]
    pub tipo_bultos: Patch<String>,
    #[serde(default)]
    pub fecha_pedido: Patch<String>,
    #[serde(default)]
    pub fecha_entrega: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub estado_id: Patch<i32>,
    #[serde(default)]
    pub observaciones: Patch<String>,
    pub en_logistica: Option<bool>,
    pub ok: Option<bool>,
}

// Filtros de GET /pedidos
#[derive(Debug, Default, Deserialize)]
pub struct PedidoFiltro {
    pub comprobante: Option<String>,
    /// Substring sobre el nombre del cliente
    pub cliente: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub cliente_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub armador_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub transporte_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub tipo_transporte_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub vendedor_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub estado_id: Option<i32>,
    pub completado: Option<bool>,
    pub en_logistica: Option<bool>,
    pub ok: Option<bool>,
    pub fecha_pedido: Option<String>,
    pub fecha_entrega: Option<String>,
}

use serde::Deserialize;

use crate::utils::patch::Patch;
use crate::utils::validation::{deserialize_bultos, deserialize_id, deserialize_id_patch};

// Request para crear una entrega parcial
#[derive(Debug, Default, Deserialize)]
pub struct CreateEntregaRequest {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub pedido_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_bultos")]
    pub cant_bultos: Option<i32>,
    pub direccion_entrega: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub armador_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub tipo_transporte_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub transporte_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub estado_id: Option<i32>,
    pub fecha_entrega: Option<String>,
    pub observaciones: Option<String>,
    #[serde(default)]
    pub completado: bool,
    #[serde(default)]
    pub ok: bool,
}

// Request para actualizar una entrega (sólo las claves enviadas)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntregaRequest {
    #[serde(default, deserialize_with = "deserialize_bultos")]
    pub cant_bultos: Option<i32>,
    #[serde(default)]
    pub direccion_entrega: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub armador_id: Patch<i32>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub tipo_transporte_id: Patch<i32>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub transporte_id: Patch<i32>,
    #[serde(default, deserialize_with = "deserialize_id_patch")]
    pub estado_id: Patch<i32>,
    #[serde(default)]
    pub fecha_entrega: Patch<String>,
    #[serde(default)]
    pub observaciones: Patch<String>,
    pub completado: Option<bool>,
    pub ok: Option<bool>,
}

// Filtros de GET /entregas
#[derive(Debug, Default, Deserialize)]
pub struct EntregaFiltro {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub pedido_id: Option<i32>,
    pub completado: Option<bool>,
    pub fecha_entrega: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub transporte_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub armador_id: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub estado_id: Option<i32>,
}

//! Modelo de Entrega
//!
//! Una entrega es un envío parcial contra el total de bultos de un pedido,
//! numerado secuencialmente dentro del pedido.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::utils::patch::Patch;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Entrega {
    pub id: i32,
    pub pedido_id: i32,
    pub numero_entrega: i32,
    pub cant_bultos: i32,
    pub direccion_entrega: Option<String>,
    pub armador_id: Option<i32>,
    pub tipo_transporte_id: Option<i32>,
    pub transporte_id: Option<i32>,
    pub estado_id: Option<i32>,
    pub fecha_entrega: Option<NaiveDate>,
    pub observaciones: Option<String>,
    pub completado: bool,
    pub ok: bool,
    pub created_at: DateTime<Utc>,
    pub comprobante: Option<String>,
    pub armador_nombre: Option<String>,
    pub transporte_nombre: Option<String>,
    pub estado_nombre: Option<String>,
}

/// Alta de entrega con la cantidad ya resuelta; el número lo asigna el store
#[derive(Debug, Clone, PartialEq)]
pub struct NuevaEntrega {
    pub pedido_id: i32,
    pub cant_bultos: i32,
    pub direccion_entrega: Option<String>,
    pub armador_id: Option<i32>,
    pub tipo_transporte_id: Option<i32>,
    pub transporte_id: Option<i32>,
    pub estado_id: Option<i32>,
    pub fecha_entrega: Option<NaiveDate>,
    pub observaciones: Option<String>,
    pub completado: bool,
    pub ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct EntregaCreada {
    pub id: i32,
    pub numero_entrega: i32,
}

/// Cambios de una entrega: sólo las claves presentes en el body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntregaCambios {
    pub cant_bultos: Option<i32>,
    pub direccion_entrega: Patch<String>,
    pub armador_id: Patch<i32>,
    pub tipo_transporte_id: Patch<i32>,
    pub transporte_id: Patch<i32>,
    pub estado_id: Patch<i32>,
    pub fecha_entrega: Patch<NaiveDate>,
    pub observaciones: Patch<String>,
    pub completado: Option<bool>,
    pub ok: Option<bool>,
}

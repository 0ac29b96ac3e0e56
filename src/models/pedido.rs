//! Modelo de Pedido
//!
//! Un pedido es el envío solicitado por un cliente, con una cantidad total
//! de bultos que puede repartirse en varias entregas parciales.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Pedido tal como lo devuelve el listado, con nombres de catálogos
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Pedido {
    pub id: i32,
    pub comprobante: Option<String>,
    pub cliente_id: Option<i32>,
    pub direccion_entrega: Option<String>,
    pub armador_id: Option<i32>,
    pub tipo_transporte_id: Option<i32>,
    pub transporte_id: Option<i32>,
    pub vendedor_id: Option<i32>,
    pub cant_bultos: i32,
    pub tipo_bultos: Option<String>,
    pub fecha_pedido: Option<NaiveDate>,
    pub fecha_entrega: Option<NaiveDate>,
    pub estado_id: Option<i32>,
    pub observaciones: Option<String>,
    pub completado: bool,
    pub fecha_completado: Option<NaiveDate>,
    pub en_logistica: bool,
    pub ok: bool,
    pub created_at: DateTime<Utc>,
    pub cliente_nombre: Option<String>,
    pub estado_nombre: Option<String>,
    pub transporte_nombre: Option<String>,
    /// Suma de bultos ya asignados a entregas
    pub bultos_entregados: i64,
}

/// Datos del pedido necesarios para las reglas de entregas
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PedidoCapacidad {
    pub id: i32,
    pub cant_bultos: i32,
    pub completado: bool,
}

/// Alta de pedido ya normalizada
#[derive(Debug, Clone, Default)]
pub struct NuevoPedido {
    pub comprobante: String,
    pub cliente_id: Option<i32>,
    pub direccion_entrega: Option<String>,
    pub armador_id: Option<i32>,
    pub tipo_transporte_id: Option<i32>,
    pub transporte_id: Option<i32>,
    pub vendedor_id: Option<i32>,
    pub cant_bultos: i32,
    pub tipo_bultos: Option<String>,
    pub fecha_pedido: Option<NaiveDate>,
    pub fecha_entrega: Option<NaiveDate>,
    pub estado_id: Option<i32>,
    pub observaciones: Option<String>,
    pub en_logistica: bool,
}

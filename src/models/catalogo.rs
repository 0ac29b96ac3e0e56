//! Modelos de catálogos
//!
//! Clientes, armadores, transportes, tipos de transporte, vendedores y
//! estados. Todos mapean 1:1 a su tabla.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Cliente {
    pub id: i32,
    pub codigo: Option<String>,
    pub nombre: String,
    pub direccion: Option<String>,
    pub localidad: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Armador: persona que prepara el pedido
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Armador {
    pub id: i32,
    pub nombre: String,
    pub apellido: Option<String>,
    pub activo: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TipoTransporte {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transporte {
    pub id: i32,
    pub nombre: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub activo: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vendedor {
    pub id: i32,
    pub nombre: String,
    pub apellido: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub activo: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Estado {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub color: Option<String>,
}

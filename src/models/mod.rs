//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL de `sql/schema.sql`.

pub mod catalogo;
pub mod devolucion;
pub mod entrega;
pub mod pedido;
pub mod reporte;
pub mod usuario;

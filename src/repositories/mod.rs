//! Acceso a datos
//!
//! Un repositorio por agregado; todos trabajan sobre el `PgPool` compartido.

pub mod catalogo_repository;
pub mod devolucion_repository;
pub mod entrega_repository;
pub mod pedido_repository;
pub mod query;
pub mod reporte_repository;
pub mod usuario_repository;

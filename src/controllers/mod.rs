//! Controllers: validan los requests y coordinan repositorios y servicios

pub mod auth_controller;
pub mod catalogo_controller;
pub mod devolucion_controller;
pub mod entrega_controller;
pub mod pedido_controller;
pub mod reporte_controller;
pub mod usuario_controller;

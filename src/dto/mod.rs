//! DTOs de requests y responses
//!
//! Los requests se validan aquí (formatos, coerciones) antes de llegar a
//! los controllers.

pub mod auth_dto;
pub mod catalogo_dto;
pub mod common_dto;
pub mod devolucion_dto;
pub mod entrega_dto;
pub mod pedido_dto;
pub mod reporte_dto;

//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y actualizaciones parciales.

pub mod errors;
pub mod patch;
pub mod validation;

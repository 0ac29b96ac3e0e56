//! Backoffice de logística: pedidos, entregas parciales, devoluciones y
//! catálogos sobre PostgreSQL, expuestos como API REST.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;

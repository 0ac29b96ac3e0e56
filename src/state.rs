//! Estado compartido de la aplicación
//!
//! Este módulo define el estado que se pasa a través del router de Axum.
//! Los repositorios se construyen por request a partir del pool.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self { pool, config }
    }

    pub fn page_size(&self) -> i64 {
        self.config.default_page_size
    }
}

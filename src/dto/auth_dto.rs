use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usuario::UsuarioPublico;
use crate::utils::patch::Patch;

// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

// Response de login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub usuario: UsuarioPublico,
}

// Request para crear un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUsuarioRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub nombre: Option<String>,
    pub rol: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUsuarioRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
    #[serde(default)]
    pub nombre: Patch<String>,
    pub rol: Option<String>,
    pub activo: Option<bool>,
}

// Filtros de GET /usuarios
#[derive(Debug, Default, Deserialize)]
pub struct UsuarioFiltro {
    pub username: Option<String>,
    pub rol: Option<String>,
    pub activo: Option<bool>,
}

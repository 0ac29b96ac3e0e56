//! Modelo de Usuario

use serde::Serialize;
use sqlx::FromRow;

/// Fila completa, incluida la contraseña almacenada
#[derive(Debug, Clone, FromRow)]
pub struct Usuario {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub nombre: Option<String>,
    pub rol: String,
    pub activo: bool,
}

/// Usuario sin contraseña para respuestas
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UsuarioPublico {
    pub id: i32,
    pub username: String,
    pub nombre: Option<String>,
    pub rol: String,
    pub activo: bool,
}

impl From<Usuario> for UsuarioPublico {
    fn from(usuario: Usuario) -> Self {
        Self {
            id: usuario.id,
            username: usuario.username,
            nombre: usuario.nombre,
            rol: usuario.rol,
            activo: usuario.activo,
        }
    }
}

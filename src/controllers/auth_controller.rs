use bcrypt::verify;
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::repositories::usuario_repository::UsuarioRepository;
use crate::utils::errors::AppError;

/// Compara la contraseña enviada con la almacenada. Las filas antiguas
/// guardan la contraseña en texto plano; las nuevas, un hash bcrypt.
pub async fn password_matches(password: String, almacenada: String) -> Result<bool, AppError> {
    if !almacenada.starts_with("$2") {
        return Ok(password == almacenada);
    }

    // bcrypt es CPU-bound: fuera del executor
    tokio::task::spawn_blocking(move || verify(password, &almacenada))
        .await
        .map_err(|e| AppError::Internal(format!("Error verificando contraseña: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Error verificando contraseña: {}", e)))
}

pub struct AuthController {
    repository: UsuarioRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsuarioRepository::new(pool),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let credenciales_invalidas = || AppError::Unauthorized("Credenciales inválidas".to_string());

        let usuario = self
            .repository
            .find_by_username(request.username.trim())
            .await?
            .filter(|u| u.activo)
            .ok_or_else(credenciales_invalidas)?;

        if !password_matches(request.password, usuario.password.clone()).await? {
            warn!("🔒 Login fallido para '{}'", usuario.username);
            return Err(credenciales_invalidas());
        }

        info!("🔑 Login exitoso: {}", usuario.username);
        Ok(LoginResponse {
            success: true,
            usuario: usuario.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plaintext_legacy_password() {
        assert!(password_matches("secreto".into(), "secreto".into()).await.unwrap());
        assert!(!password_matches("otro".into(), "secreto".into()).await.unwrap());
    }

    #[tokio::test]
    async fn test_bcrypt_password() {
        let hash = bcrypt::hash("secreto", 4).unwrap();
        assert!(password_matches("secreto".into(), hash.clone()).await.unwrap());
        assert!(!password_matches("otro".into(), hash).await.unwrap());
    }
}

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::auth_dto::{CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioFiltro};
use crate::dto::common_dto::{CreatedResponse, ListParams, Page};
use crate::models::usuario::UsuarioPublico;
use crate::repositories::usuario_repository::{NuevoUsuario, UsuarioCambios, UsuarioRepository};
use crate::utils::errors::{not_found_error, AppError};

const ROL_POR_DEFECTO: &str = "usuario";

/// Hashea con bcrypt en el pool de bloqueo de tokio
async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))
}

pub struct UsuarioController {
    repository: UsuarioRepository,
}

impl UsuarioController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UsuarioRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        filtro: UsuarioFiltro,
        params: ListParams,
        default_page_size: i64,
    ) -> Result<Page<UsuarioPublico>, AppError> {
        self.repository.list(&filtro, &params, default_page_size).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<UsuarioPublico, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", id))
    }

    pub async fn create(&self, request: CreateUsuarioRequest) -> Result<CreatedResponse, AppError> {
        request.validate()?;

        let nuevo = NuevoUsuario {
            username: request.username.trim().to_string(),
            password_hash: hash_password(request.password, DEFAULT_COST).await?,
            nombre: request.nombre,
            rol: request.rol.unwrap_or_else(|| ROL_POR_DEFECTO.to_string()),
            activo: request.activo.unwrap_or(true),
        };

        let id = self.repository.create(nuevo).await?;
        info!("👤 Usuario {} creado", id);
        Ok(CreatedResponse { id })
    }

    pub async fn update(&self, id: i32, request: UpdateUsuarioRequest) -> Result<(), AppError> {
        request.validate()?;

        let password_hash = match request.password {
            Some(password) => Some(hash_password(password, DEFAULT_COST).await?),
            None => None,
        };

        let cambios = UsuarioCambios {
            username: request.username.map(|u| u.trim().to_string()),
            password_hash,
            nombre: request.nombre,
            rol: request.rol,
            activo: request.activo,
        };

        self.repository.update(id, cambios).await?;
        info!("✏️ Usuario {} actualizado", id);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        info!("🗑️ Usuario {} eliminado", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_password_is_bcrypt() {
        let hashed = hash_password("secreto".to_string(), 4).await.unwrap();
        assert!(hashed.starts_with("$2"));
        assert!(bcrypt::verify("secreto", &hashed).unwrap());
    }
}

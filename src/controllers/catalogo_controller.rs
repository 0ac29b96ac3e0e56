use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::common_dto::{CreatedResponse, ListParams, Page};
use crate::repositories::catalogo_repository::Catalogo;
use crate::utils::errors::{not_found_error, AppError};

/// CRUD genérico para cualquier tabla de catálogo
pub struct CatalogoController<R> {
    repository: R,
}

impl<R: Catalogo> CatalogoController<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: R::new(pool),
        }
    }

    pub async fn list(
        &self,
        filtro: R::Filtro,
        params: ListParams,
        default_page_size: i64,
    ) -> Result<Page<R::Fila>, AppError> {
        self.repository.list(&filtro, &params, default_page_size).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<R::Fila, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(R::RECURSO, id))
    }

    pub async fn create(&self, request: R::Alta) -> Result<CreatedResponse, AppError> {
        request.validate()?;
        let id = self.repository.create(request).await?;
        info!("🗂️ {} {} creado", R::RECURSO, id);
        Ok(CreatedResponse { id })
    }

    pub async fn update(&self, id: i32, request: R::Cambios) -> Result<(), AppError> {
        request.validate()?;
        self.repository.update(id, request).await?;
        info!("✏️ {} {} actualizado", R::RECURSO, id);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        info!("🗑️ {} {} eliminado", R::RECURSO, id);
        Ok(())
    }
}

use sqlx::PgPool;
use tracing::info;

use crate::dto::common_dto::{CreatedResponse, ListParams, Page};
use crate::dto::entrega_dto::{CreateEntregaRequest, EntregaFiltro, UpdateEntregaRequest};
use crate::models::entrega::Entrega;
use crate::repositories::entrega_repository::{EntregaRepository, EntregaStore};
use crate::services::entrega_service::EntregaService;
use crate::utils::errors::{not_found_error, AppError};

pub struct EntregaController {
    service: EntregaService<EntregaRepository>,
}

impl EntregaController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: EntregaService::new(EntregaRepository::new(pool)),
        }
    }

    fn repository(&self) -> &EntregaRepository {
        self.service.store()
    }

    pub async fn list(
        &self,
        filtro: EntregaFiltro,
        params: ListParams,
        default_page_size: i64,
    ) -> Result<Page<Entrega>, AppError> {
        self.repository().list(&filtro, &params, default_page_size).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Entrega, AppError> {
        self.repository()
            .find_entrega(id)
            .await?
            .ok_or_else(|| not_found_error("Entrega", id))
    }

    /// Entregas de un pedido en orden de `numero_entrega`
    pub async fn list_by_pedido(&self, pedido_id: i32) -> Result<Vec<Entrega>, AppError> {
        self.repository().find_by_pedido(pedido_id).await
    }

    pub async fn create(&self, request: CreateEntregaRequest) -> Result<CreatedResponse, AppError> {
        let id = self.service.create(request).await?;
        Ok(CreatedResponse { id })
    }

    pub async fn update(&self, id: i32, request: UpdateEntregaRequest) -> Result<(), AppError> {
        self.service.update(id, request).await
    }

    pub async fn set_completado(&self, id: i32, completado: bool) -> Result<(), AppError> {
        self.service.set_completado(id, completado).await
    }

    pub async fn set_ok(&self, id: i32, ok: bool) -> Result<(), AppError> {
        self.repository().set_ok(id, ok).await?;
        info!("👌 Entrega {} ok={}", id, ok);
        Ok(())
    }

    /// Borra la entrega; el estado del pedido no se recalcula
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository().delete(id).await?;
        info!("🗑️ Entrega {} eliminada", id);
        Ok(())
    }
}

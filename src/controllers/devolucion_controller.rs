use sqlx::PgPool;
use tracing::info;

use crate::dto::common_dto::{CreatedResponse, ListParams, Page};
use crate::dto::devolucion_dto::{CreateDevolucionRequest, DevolucionFiltro, UpdateDevolucionRequest};
use crate::models::devolucion::{Devolucion, TIPOS_DEVOLUCION};
use crate::repositories::devolucion_repository::{
    DevolucionCambios, DevolucionFlag, DevolucionRepository, NuevaDevolucion,
};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{parse_fecha, parse_fecha_patch, validate_enum};

fn check_tipo(tipo: &str) -> Result<(), AppError> {
    validate_enum(tipo, &TIPOS_DEVOLUCION).map_err(|_| {
        AppError::BadRequest(format!(
            "Tipo inválido '{}': debe ser {}",
            tipo,
            TIPOS_DEVOLUCION.join(" o ")
        ))
    })
}

pub struct DevolucionController {
    repository: DevolucionRepository,
}

impl DevolucionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DevolucionRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        filtro: DevolucionFiltro,
        params: ListParams,
        default_page_size: i64,
    ) -> Result<Page<Devolucion>, AppError> {
        self.repository.list(&filtro, &params, default_page_size).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Devolucion, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Devolución", id))
    }

    pub async fn create(&self, request: CreateDevolucionRequest) -> Result<CreatedResponse, AppError> {
        let tipo = request.tipo.unwrap_or_else(|| TIPOS_DEVOLUCION[0].to_string());
        check_tipo(&tipo)?;

        let nueva = NuevaDevolucion {
            pedido_id: request.pedido_id,
            cliente_id: request.cliente_id,
            tipo,
            descripcion: request.descripcion,
            monto: request.monto,
            fecha: parse_fecha("fecha", request.fecha.as_deref())?,
            transporte_id: request.transporte_id,
            estado_id: request.estado_id,
            observaciones: request.observaciones,
            recibido: request.recibido,
            en_logistica: request.en_logistica,
        };

        let id = self.repository.create(nueva).await?;
        info!("↩️ Devolución {} creada", id);
        Ok(CreatedResponse { id })
    }

    pub async fn update(&self, id: i32, request: UpdateDevolucionRequest) -> Result<(), AppError> {
        if let Some(tipo) = request.tipo.as_deref() {
            check_tipo(tipo)?;
        }

        let cambios = DevolucionCambios {
            pedido_id: request.pedido_id,
            cliente_id: request.cliente_id,
            tipo: request.tipo,
            descripcion: request.descripcion,
            monto: request.monto,
            fecha: parse_fecha_patch("fecha", request.fecha)?,
            transporte_id: request.transporte_id,
            estado_id: request.estado_id,
            observaciones: request.observaciones,
            recibido: request.recibido,
            completado: request.completado,
            en_logistica: request.en_logistica,
            ok: request.ok,
        };

        self.repository.update(id, cambios).await?;
        info!("✏️ Devolución {} actualizada", id);
        Ok(())
    }

    pub async fn set_flag(&self, id: i32, flag: DevolucionFlag, value: bool) -> Result<(), AppError> {
        self.repository.set_flag(id, flag, value).await?;
        info!("🏷️ Devolución {} {:?}={}", id, flag, value);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        info!("🗑️ Devolución {} eliminada", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tipo() {
        assert!(check_tipo("devolucion").is_ok());
        assert!(check_tipo("cobranza").is_ok());
        let err = check_tipo("canje").unwrap_err();
        assert_eq!(err.to_string(), "Tipo inválido 'canje': debe ser devolucion o cobranza");
    }
}

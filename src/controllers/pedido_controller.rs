use sqlx::PgPool;
use tracing::{info, warn};

use crate::dto::common_dto::{CreatedResponse, ListParams, Page};
use crate::dto::pedido_dto::{CreatePedidoRequest, PedidoFiltro, UpdatePedidoRequest};
use crate::models::pedido::{NuevoPedido, Pedido};
use crate::repositories::entrega_repository::{EntregaRepository, EntregaStore};
use crate::repositories::pedido_repository::{PedidoCambios, PedidoFlag, PedidoRepository};
use crate::services::entrega_service::EntregaService;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};
use crate::utils::validation::{parse_fecha, parse_fecha_patch};

pub struct PedidoController {
    repository: PedidoRepository,
    entregas: EntregaService<EntregaRepository>,
}

impl PedidoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PedidoRepository::new(pool.clone()),
            entregas: EntregaService::new(EntregaRepository::new(pool)),
        }
    }

    pub async fn list(
        &self,
        filtro: PedidoFiltro,
        params: ListParams,
        default_page_size: i64,
    ) -> Result<Page<Pedido>, AppError> {
        self.repository.list(&filtro, &params, default_page_size).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Pedido, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Pedido", id))
    }

    pub async fn create(&self, request: CreatePedidoRequest) -> Result<CreatedResponse, AppError> {
        let comprobante = request
            .comprobante
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| bad_request_error("El comprobante es requerido"))?;

        let nuevo = NuevoPedido {
            comprobante,
            cliente_id: request.cliente_id,
            direccion_entrega: request.direccion_entrega,
            armador_id: request.armador_id,
            tipo_transporte_id: request.tipo_transporte_id,
            transporte_id: request.transporte_id,
            vendedor_id: request.vendedor_id,
            cant_bultos: request.cant_bultos.unwrap_or(0),
            tipo_bultos: request.tipo_bultos,
            fecha_pedido: parse_fecha("fecha_pedido", request.fecha_pedido.as_deref())?,
            fecha_entrega: parse_fecha("fecha_entrega", request.fecha_entrega.as_deref())?,
            estado_id: request.estado_id,
            observaciones: request.observaciones,
            en_logistica: request.en_logistica,
        };

        let id = self.repository.create(nuevo).await?;
        info!("📋 Pedido {} creado", id);
        Ok(CreatedResponse { id })
    }

    pub async fn update(&self, id: i32, request: UpdatePedidoRequest) -> Result<(), AppError> {
        let actual = self.get_by_id(id).await?;

        let comprobante = match request.comprobante.map(|c| c.trim().to_string()) {
            Some(c) if c.is_empty() => return Err(bad_request_error("El comprobante no puede estar vacío")),
            other => other,
        };

        // Los bultos del pedido no pueden quedar por debajo de lo ya asignado
        if let Some(cant_bultos) = request.cant_bultos.filter(|n| *n < actual.cant_bultos) {
            let asignados = self.entregas.store().sum_bultos(id, None).await?;
            if i64::from(cant_bultos) < asignados {
                warn!("🚫 Pedido {}: {} bultos < {} asignados", id, cant_bultos, asignados);
                return Err(AppError::BadRequest(format!(
                    "La cantidad de bultos del pedido ({}) es menor a la asignada en entregas ({})",
                    cant_bultos, asignados
                )));
            }
        }

        let cambios = PedidoCambios {
            comprobante,
            cliente_id: request.cliente_id,
            direccion_entrega: request.direccion_entrega,
            armador_id: request.armador_id,
            tipo_transporte_id: request.tipo_transporte_id,
            transporte_id: request.transporte_id,
            vendedor_id: request.vendedor_id,
            cant_bultos: request.cant_bultos,
            tipo_bultos: request.tipo_bultos,
            fecha_pedido: parse_fecha_patch("fecha_pedido", request.fecha_pedido)?,
            fecha_entrega: parse_fecha_patch("fecha_entrega", request.fecha_entrega)?,
            estado_id: request.estado_id,
            observaciones: request.observaciones,
            en_logistica: request.en_logistica,
            ok: request.ok,
        };

        self.repository.update(id, cambios).await?;
        info!("✏️ Pedido {} actualizado", id);
        Ok(())
    }

    pub async fn set_completado(&self, id: i32, completado: bool) -> Result<(), AppError> {
        self.entregas.set_pedido_completado(id, completado).await
    }

    pub async fn set_flag(&self, id: i32, flag: PedidoFlag, value: bool) -> Result<(), AppError> {
        self.repository.set_flag(id, flag, value).await?;
        info!("🏷️ Pedido {} {:?}={}", id, flag, value);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        info!("🗑️ Pedido {} eliminado", id);
        Ok(())
    }
}

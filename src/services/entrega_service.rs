//! Reglas de consistencia entre pedidos y entregas parciales
//!
//! - La suma de bultos de las entregas nunca supera los bultos del pedido.
//! - Cada entrega recibe el siguiente `numero_entrega` del pedido.
//! - El pedido queda completado sólo si todas sus entregas lo están.
//!
//! La verificación de capacidad y el alta no van en una transacción: dos
//! altas concurrentes sobre el mismo pedido pueden superar el total.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::dto::entrega_dto::{CreateEntregaRequest, UpdateEntregaRequest};
use crate::models::entrega::{EntregaCambios, NuevaEntrega};
use crate::repositories::entrega_repository::EntregaStore;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};
use crate::utils::validation::{parse_fecha, parse_fecha_patch};

/// Rechaza la operación si `otras + solicitada` supera la capacidad del pedido
pub fn check_capacidad(otras: i64, solicitada: i32, capacidad: i32) -> AppResult<()> {
    let total = otras + i64::from(solicitada);
    if total > i64::from(capacidad) {
        return Err(AppError::BadRequest(format!(
            "La cantidad de bultos excede el total del pedido: {} bultos asignados de {} disponibles",
            total, capacidad
        )));
    }
    Ok(())
}

/// Un pedido con entregas está completo si todas sus entregas lo están
pub fn todas_completas(estados: &[bool]) -> bool {
    !estados.is_empty() && estados.iter().all(|completado| *completado)
}

fn hoy() -> NaiveDate {
    Local::now().date_naive()
}

pub struct EntregaService<S> {
    store: S,
}

impl<S: EntregaStore> EntregaService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Alta de una entrega parcial; devuelve el id generado
    pub async fn create(&self, request: CreateEntregaRequest) -> AppResult<i32> {
        let pedido_id = request
            .pedido_id
            .ok_or_else(|| bad_request_error("pedido_id es requerido"))?;

        let pedido = self
            .store
            .find_pedido(pedido_id)
            .await?
            .ok_or_else(|| not_found_error("Pedido", pedido_id))?;

        let fecha_entrega = parse_fecha("fecha_entrega", request.fecha_entrega.as_deref())?;
        let cant_bultos = request.cant_bultos.unwrap_or(0);

        let asignados = self.store.sum_bultos(pedido_id, None).await?;
        if let Err(e) = check_capacidad(asignados, cant_bultos, pedido.cant_bultos) {
            warn!("🚫 Entrega rechazada para pedido {}: {}", pedido_id, e);
            return Err(e);
        }

        let creada = self
            .store
            .insert(NuevaEntrega {
                pedido_id,
                cant_bultos,
                direccion_entrega: request.direccion_entrega,
                armador_id: request.armador_id,
                tipo_transporte_id: request.tipo_transporte_id,
                transporte_id: request.transporte_id,
                estado_id: request.estado_id,
                fecha_entrega,
                observaciones: request.observaciones,
                completado: request.completado,
                ok: request.ok,
            })
            .await?;

        info!(
            "📦 Entrega {} creada (pedido {}, entrega #{}, {} bultos)",
            creada.id, pedido_id, creada.numero_entrega, cant_bultos
        );
        Ok(creada.id)
    }

    /// Actualiza sólo las claves enviadas, revalidando la capacidad si cambia
    /// la cantidad de bultos
    pub async fn update(&self, id: i32, request: UpdateEntregaRequest) -> AppResult<()> {
        let actual = self
            .store
            .find_entrega(id)
            .await?
            .ok_or_else(|| not_found_error("Entrega", id))?;

        let fecha_entrega = parse_fecha_patch("fecha_entrega", request.fecha_entrega)?;

        if let Some(cant_bultos) = request.cant_bultos.filter(|n| *n != actual.cant_bultos) {
            let pedido = self
                .store
                .find_pedido(actual.pedido_id)
                .await?
                .ok_or_else(|| not_found_error("Pedido", actual.pedido_id))?;

            let otras = self.store.sum_bultos(actual.pedido_id, Some(id)).await?;
            if let Err(e) = check_capacidad(otras, cant_bultos, pedido.cant_bultos) {
                warn!("🚫 Actualización de entrega {} rechazada: {}", id, e);
                return Err(e);
            }
        }

        let cambios = EntregaCambios {
            cant_bultos: request.cant_bultos,
            direccion_entrega: request.direccion_entrega,
            armador_id: request.armador_id,
            tipo_transporte_id: request.tipo_transporte_id,
            transporte_id: request.transporte_id,
            estado_id: request.estado_id,
            fecha_entrega,
            observaciones: request.observaciones,
            completado: request.completado,
            ok: request.ok,
        };
        self.store.update(id, cambios).await?;

        info!("✏️ Entrega {} actualizada", id);
        Ok(())
    }

    /// Marca la entrega y recalcula el estado del pedido padre
    pub async fn set_completado(&self, id: i32, completado: bool) -> AppResult<()> {
        let entrega = self
            .store
            .find_entrega(id)
            .await?
            .ok_or_else(|| not_found_error("Entrega", id))?;

        self.store.set_completado(id, completado).await?;

        let estados = self.store.estados_completado(entrega.pedido_id).await?;
        let pedido_completo = todas_completas(&estados);
        self.store
            .set_pedido_completado(entrega.pedido_id, pedido_completo, hoy())
            .await?;

        info!(
            "✅ Entrega {} completado={} → pedido {} completado={}",
            id, completado, entrega.pedido_id, pedido_completo
        );
        Ok(())
    }

    /// Completa o reabre un pedido directamente. Con entregas, sólo se
    /// completa si todas están completas; las entregas no se tocan.
    pub async fn set_pedido_completado(&self, pedido_id: i32, completado: bool) -> AppResult<()> {
        self.store
            .find_pedido(pedido_id)
            .await?
            .ok_or_else(|| not_found_error("Pedido", pedido_id))?;

        if completado {
            let estados = self.store.estados_completado(pedido_id).await?;
            let pendientes = estados.iter().filter(|c| !**c).count();
            if pendientes > 0 {
                warn!("🚫 Pedido {} con {} entregas pendientes", pedido_id, pendientes);
                return Err(AppError::BadRequest(format!(
                    "No se puede completar el pedido: {} de {} entregas están pendientes",
                    pendientes,
                    estados.len()
                )));
            }
        }

        self.store
            .set_pedido_completado(pedido_id, completado, hoy())
            .await?;

        info!("✅ Pedido {} completado={}", pedido_id, completado);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_capacidad() {
        assert!(check_capacidad(6, 4, 10).is_ok());
        assert!(check_capacidad(0, 0, 0).is_ok());

        let err = check_capacidad(6, 5, 10).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        let message = err.to_string();
        assert!(message.contains("11"));
        assert!(message.contains("10"));
    }

    #[test]
    fn test_todas_completas() {
        assert!(!todas_completas(&[]));
        assert!(!todas_completas(&[true, false]));
        assert!(todas_completas(&[true, true]));
    }
}

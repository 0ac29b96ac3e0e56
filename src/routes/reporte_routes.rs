use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::reporte_controller::ReporteController;
use crate::dto::common_dto::RangoFechas;
use crate::dto::reporte_dto::LogisticaResponse;
use crate::models::reporte::{Agrupado, ResumenGeneral};
use crate::repositories::reporte_repository::Agrupacion;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reporte_router() -> Router<AppState> {
    Router::new()
        .route("/resumen", get(resumen))
        .route("/pedidos-por-estado", get(pedidos_por_estado))
        .route("/pedidos-por-cliente", get(pedidos_por_cliente))
        .route("/entregas-por-transporte", get(entregas_por_transporte))
}

pub fn create_logistica_router() -> Router<AppState> {
    Router::new().route("/logistica", get(logistica))
}

async fn resumen(
    State(state): State<AppState>,
    Query(rango): Query<RangoFechas>,
) -> Result<Json<ResumenGeneral>, AppError> {
    let controller = ReporteController::new(state.pool.clone());
    Ok(Json(controller.resumen(rango).await?))
}

async fn agrupado(
    state: AppState,
    agrupacion: Agrupacion,
    rango: RangoFechas,
) -> Result<Json<Vec<Agrupado>>, AppError> {
    let controller = ReporteController::new(state.pool.clone());
    Ok(Json(controller.agrupado(agrupacion, rango).await?))
}

async fn pedidos_por_estado(
    State(state): State<AppState>,
    Query(rango): Query<RangoFechas>,
) -> Result<Json<Vec<Agrupado>>, AppError> {
    agrupado(state, Agrupacion::PedidosPorEstado, rango).await
}

async fn pedidos_por_cliente(
    State(state): State<AppState>,
    Query(rango): Query<RangoFechas>,
) -> Result<Json<Vec<Agrupado>>, AppError> {
    agrupado(state, Agrupacion::PedidosPorCliente, rango).await
}

async fn entregas_por_transporte(
    State(state): State<AppState>,
    Query(rango): Query<RangoFechas>,
) -> Result<Json<Vec<Agrupado>>, AppError> {
    agrupado(state, Agrupacion::EntregasPorTransporte, rango).await
}

async fn logistica(State(state): State<AppState>) -> Result<Json<LogisticaResponse>, AppError> {
    let controller = ReporteController::new(state.pool.clone());
    Ok(Json(controller.logistica().await?))
}

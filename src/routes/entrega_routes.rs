use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::entrega_controller::EntregaController;
use crate::dto::common_dto::{
    CompletadoRequest, CreatedResponse, ListParams, OkRequest, Page, SuccessResponse,
};
use crate::dto::entrega_dto::{CreateEntregaRequest, EntregaFiltro, UpdateEntregaRequest};
use crate::models::entrega::Entrega;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_entrega_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entregas).post(create_entrega))
        .route("/pedido/:pedido_id", get(list_by_pedido))
        .route("/:id", get(get_entrega).put(update_entrega).delete(delete_entrega))
        .route("/:id/completado", put(set_completado))
        .route("/:id/ok", put(set_ok))
}

async fn list_entregas(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filtro): Query<EntregaFiltro>,
) -> Result<Json<Page<Entrega>>, AppError> {
    let controller = EntregaController::new(state.pool.clone());
    let page = controller.list(filtro, params, state.page_size()).await?;
    Ok(Json(page))
}

async fn list_by_pedido(
    State(state): State<AppState>,
    Path(pedido_id): Path<i32>,
) -> Result<Json<Vec<Entrega>>, AppError> {
    let controller = EntregaController::new(state.pool.clone());
    let entregas = controller.list_by_pedido(pedido_id).await?;
    Ok(Json(entregas))
}

async fn get_entrega(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Entrega>, AppError> {
    let controller = EntregaController::new(state.pool.clone());
    let entrega = controller.get_by_id(id).await?;
    Ok(Json(entrega))
}

async fn create_entrega(
    State(state): State<AppState>,
    Json(request): Json<CreateEntregaRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let controller = EntregaController::new(state.pool.clone());
    let created = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_entrega(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEntregaRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = EntregaController::new(state.pool.clone());
    controller.update(id, request).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn set_completado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CompletadoRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = EntregaController::new(state.pool.clone());
    controller.set_completado(id, request.completado).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn set_ok(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<OkRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = EntregaController::new(state.pool.clone());
    controller.set_ok(id, request.ok).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn delete_entrega(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = EntregaController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::pedido_controller::PedidoController;
use crate::dto::common_dto::{
    CompletadoRequest, CreatedResponse, ListParams, LogisticaRequest, OkRequest, Page,
    SuccessResponse,
};
use crate::dto::pedido_dto::{CreatePedidoRequest, PedidoFiltro, UpdatePedidoRequest};
use crate::models::pedido::Pedido;
use crate::repositories::pedido_repository::PedidoFlag;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pedido_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pedidos).post(create_pedido))
        .route("/:id", get(get_pedido).put(update_pedido).delete(delete_pedido))
        .route("/:id/completado", put(set_completado))
        .route("/:id/logistica", put(set_logistica))
        .route("/:id/ok", put(set_ok))
}

async fn list_pedidos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filtro): Query<PedidoFiltro>,
) -> Result<Json<Page<Pedido>>, AppError> {
    let controller = PedidoController::new(state.pool.clone());
    let page = controller.list(filtro, params, state.page_size()).await?;
    Ok(Json(page))
}

async fn get_pedido(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Pedido>, AppError> {
    let controller = PedidoController::new(state.pool.clone());
    let pedido = controller.get_by_id(id).await?;
    Ok(Json(pedido))
}

async fn create_pedido(
    State(state): State<AppState>,
    Json(request): Json<CreatePedidoRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let controller = PedidoController::new(state.pool.clone());
    let created = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_pedido(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdatePedidoRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = PedidoController::new(state.pool.clone());
    controller.update(id, request).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn set_completado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CompletadoRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = PedidoController::new(state.pool.clone());
    controller.set_completado(id, request.completado).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn set_logistica(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<LogisticaRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = PedidoController::new(state.pool.clone());
    controller
        .set_flag(id, PedidoFlag::EnLogistica, request.en_logistica)
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn set_ok(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<OkRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = PedidoController::new(state.pool.clone());
    controller.set_flag(id, PedidoFlag::Ok, request.ok).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn delete_pedido(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = PedidoController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::devolucion_controller::DevolucionController;
use crate::dto::common_dto::{
    CompletadoRequest, CreatedResponse, ListParams, LogisticaRequest, OkRequest, Page,
    RecibidoRequest, SuccessResponse,
};
use crate::dto::devolucion_dto::{CreateDevolucionRequest, DevolucionFiltro, UpdateDevolucionRequest};
use crate::models::devolucion::Devolucion;
use crate::repositories::devolucion_repository::DevolucionFlag;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_devolucion_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_devoluciones).post(create_devolucion))
        .route(
            "/:id",
            get(get_devolucion).put(update_devolucion).delete(delete_devolucion),
        )
        .route("/:id/logistica", put(set_logistica))
        .route("/:id/recibido", put(set_recibido))
        .route("/:id/completado", put(set_completado))
        .route("/:id/ok", put(set_ok))
}

async fn list_devoluciones(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filtro): Query<DevolucionFiltro>,
) -> Result<Json<Page<Devolucion>>, AppError> {
    let controller = DevolucionController::new(state.pool.clone());
    let page = controller.list(filtro, params, state.page_size()).await?;
    Ok(Json(page))
}

async fn get_devolucion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Devolucion>, AppError> {
    let controller = DevolucionController::new(state.pool.clone());
    let devolucion = controller.get_by_id(id).await?;
    Ok(Json(devolucion))
}

async fn create_devolucion(
    State(state): State<AppState>,
    Json(request): Json<CreateDevolucionRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let controller = DevolucionController::new(state.pool.clone());
    let created = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_devolucion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateDevolucionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = DevolucionController::new(state.pool.clone());
    controller.update(id, request).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn set_flag(state: AppState, id: i32, flag: DevolucionFlag, value: bool) -> Result<Json<SuccessResponse>, AppError> {
    let controller = DevolucionController::new(state.pool.clone());
    controller.set_flag(id, flag, value).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn set_logistica(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<LogisticaRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    set_flag(state, id, DevolucionFlag::EnLogistica, request.en_logistica).await
}

async fn set_recibido(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<RecibidoRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    set_flag(state, id, DevolucionFlag::Recibido, request.recibido).await
}

async fn set_completado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CompletadoRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    set_flag(state, id, DevolucionFlag::Completado, request.completado).await
}

async fn set_ok(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<OkRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    set_flag(state, id, DevolucionFlag::Ok, request.ok).await
}

async fn delete_devolucion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = DevolucionController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

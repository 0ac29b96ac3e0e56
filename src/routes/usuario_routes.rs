use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::usuario_controller::UsuarioController;
use crate::dto::auth_dto::{CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioFiltro};
use crate::dto::common_dto::{CreatedResponse, ListParams, Page, SuccessResponse};
use crate::models::usuario::UsuarioPublico;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_usuario_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_usuarios).post(create_usuario))
        .route("/:id", get(get_usuario).put(update_usuario).delete(delete_usuario))
}

async fn list_usuarios(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filtro): Query<UsuarioFiltro>,
) -> Result<Json<Page<UsuarioPublico>>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    let page = controller.list(filtro, params, state.page_size()).await?;
    Ok(Json(page))
}

async fn get_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UsuarioPublico>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    let usuario = controller.get_by_id(id).await?;
    Ok(Json(usuario))
}

async fn create_usuario(
    State(state): State<AppState>,
    Json(request): Json<CreateUsuarioRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    let created = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateUsuarioRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    controller.update(id, request).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn delete_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = UsuarioController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

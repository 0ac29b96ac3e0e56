//! Rutas CRUD compartidas por todas las tablas de catálogo

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::catalogo_controller::CatalogoController;
use crate::dto::common_dto::{CreatedResponse, ListParams, Page, SuccessResponse};
use crate::repositories::catalogo_repository::Catalogo;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_catalogo_router<R: Catalogo>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route("/:id", get(get_one::<R>).put(update::<R>).delete(delete::<R>))
}

async fn list<R: Catalogo>(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    Query(filtro): Query<R::Filtro>,
) -> Result<Json<Page<R::Fila>>, AppError> {
    let controller = CatalogoController::<R>::new(state.pool.clone());
    let page = controller.list(filtro, params, state.page_size()).await?;
    Ok(Json(page))
}

async fn get_one<R: Catalogo>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<R::Fila>, AppError> {
    let controller = CatalogoController::<R>::new(state.pool.clone());
    let fila = controller.get_by_id(id).await?;
    Ok(Json(fila))
}

async fn create<R: Catalogo>(
    State(state): State<AppState>,
    Json(request): Json<R::Alta>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let controller = CatalogoController::<R>::new(state.pool.clone());
    let created = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update<R: Catalogo>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<R::Cambios>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = CatalogoController::<R>::new(state.pool.clone());
    controller.update(id, request).await?;
    Ok(Json(SuccessResponse::ok()))
}

async fn delete<R: Catalogo>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, AppError> {
    let controller = CatalogoController::<R>::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

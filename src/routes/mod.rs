//! Router HTTP
//!
//! Un router por entidad; `create_router` los monta con CORS y trazas.

pub mod auth_routes;
pub mod catalogo_routes;
pub mod devolucion_routes;
pub mod entrega_routes;
pub mod pedido_routes;
pub mod reporte_routes;
pub mod usuario_routes;

use axum::{extract::State, http::Uri, routing::get, Json, Router};
use tower_http::trace::TraceLayer;

use crate::dto::reporte_dto::HealthResponse;
use crate::middleware::cors_layer;
use crate::repositories::catalogo_repository::{
    ArmadorRepository, ClienteRepository, EstadoRepository, TipoTransporteRepository,
    TransporteRepository, VendedorRepository,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use catalogo_routes::create_catalogo_router;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/entregas", entrega_routes::create_entrega_router())
        .nest("/pedidos", pedido_routes::create_pedido_router())
        .nest("/devoluciones", devolucion_routes::create_devolucion_router())
        .nest("/clientes", create_catalogo_router::<ClienteRepository>())
        .nest("/armadores", create_catalogo_router::<ArmadorRepository>())
        .nest("/vendedores", create_catalogo_router::<VendedorRepository>())
        .nest("/transportes", create_catalogo_router::<TransporteRepository>())
        .nest("/tipos-transporte", create_catalogo_router::<TipoTransporteRepository>())
        .nest("/estados", create_catalogo_router::<EstadoRepository>())
        .nest("/usuarios", usuario_routes::create_usuario_router())
        .nest("/reportes", reporte_routes::create_reporte_router())
        .merge(reporte_routes::create_logistica_router())
        .merge(auth_routes::create_auth_router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
    })
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Ruta no encontrada: {}", uri.path()))
}

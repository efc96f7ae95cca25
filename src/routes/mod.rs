//! Routers de la API
//!
//! `/api/transmisi` y `/api/kendaraan`, con los layers comunes.

pub mod kendaraan_routes;
pub mod transmisi_routes;

use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .nest("/api/transmisi", transmisi_routes::create_transmisi_router())
        .nest("/api/kendaraan", kendaraan_routes::create_kendaraan_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}

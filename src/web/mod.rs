//! Inbound HTTP surface

pub mod routes;
pub mod views;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::core::{CatalogProvider, RateProvider};

pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub rates: Arc<dyn RateProvider>,
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/{from}", get(routes::currency))
        .route("/{from}/{to}", get(routes::conversion))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Route handlers. Every route renders with whatever data the providers
//! return, so responses are always 200 even when upstream is down.

use axum::extract::{Path, State};
use axum::response::Html;
use std::sync::Arc;
use tracing::warn;

use crate::web::{AppState, views};

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let fetched = state.catalog.fetch_currencies().await;
    if fetched.is_fallback() {
        warn!("Rendering currency listing from fallback data");
    }
    Html(views::index_page(fetched.value()))
}

pub async fn currency(
    State(state): State<Arc<AppState>>,
    Path(from): Path<String>,
) -> Html<String> {
    let fetched = state.catalog.fetch_currencies().await;
    if fetched.is_fallback() {
        warn!("Rendering target listing for {from} from fallback data");
    }
    Html(views::currency_page(&from, fetched.value()))
}

pub async fn conversion(
    State(state): State<Arc<AppState>>,
    Path((from, to)): Path<(String, String)>,
) -> Html<String> {
    let fetched = state.rates.fetch_rate(&from, &to).await;
    if fetched.is_fallback() {
        warn!("Rendering conversion {from}->{to} from fallback rate");
    }
    Html(views::conversion_page(&from, &to, *fetched.value()))
}

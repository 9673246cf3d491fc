pub mod config;
pub mod core;
pub mod providers;
pub mod web;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::providers::exchange_host::ExchangeHostClient;
use crate::web::AppState;

pub fn build_state(config: &config::AppConfig) -> Result<Arc<AppState>> {
    let client = Arc::new(ExchangeHostClient::new(&config.api)?);
    Ok(Arc::new(AppState {
        catalog: client.clone(),
        rates: client,
    }))
}

pub async fn run(config_path: Option<&str>) -> Result<()> {
    info!("Currency browser starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let state = build_state(&config)?;
    let router = web::app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.listen_addr))?;
    info!("Listening on {}", config.server.listen_addr);

    axum::serve(listener, router).await?;
    Ok(())
}

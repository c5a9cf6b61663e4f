//! Demand Forecaster - hourly grid demand prediction service
//!
//! Serves model training, per-station hourly forecasts, and historical
//! accuracy rollups over HTTP.

use anyhow::Result;
use forecaster_lib::{
    forecast::SyntheticConditions, ForecastMetrics, ForecastService, MemoryStore, StructuredLogger,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

const FORECASTER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting demand-forecaster");

    // Load configuration
    let config = config::ForecasterConfig::load()?;
    info!(instance = %config.instance_name, "Forecaster configured");

    // Initialize metrics
    let metrics = ForecastMetrics::new();

    // Initialize structured logger
    let logger = StructuredLogger::new(&config.instance_name);
    logger.log_startup(FORECASTER_VERSION);

    // Wire the store, exogenous source, and service
    let store = Arc::new(MemoryStore::new());
    let exogenous = Arc::new(SyntheticConditions::new(config.base_demand));
    let service = Arc::new(ForecastService::new(store, exogenous, metrics));

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(service));

    // Start the API server
    let _api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");

    Ok(())
}

//! HTTP API for training, forecasting, performance, health and metrics

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use forecaster_lib::{ForecastError, ForecastService, HealthReport};
use prometheus::{Encoder, TextEncoder};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
}

impl AppState {
    pub fn new(service: Arc<ForecastService>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastQuery {
    start: Option<String>,
    end: Option<String>,
}

/// Map a pipeline error to an HTTP status and JSON body
fn error_response(err: ForecastError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &err {
        ForecastError::InvalidRange(_) => StatusCode::BAD_REQUEST,
        ForecastError::StationNotFound(_) => StatusCode::NOT_FOUND,
        ForecastError::ModelNotTrained => StatusCode::CONFLICT,
        ForecastError::InsufficientData { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ForecastError::Store(_) | ForecastError::Fit(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

fn parse_bound(value: Option<&str>, name: &str) -> Result<DateTime<Utc>, ForecastError> {
    let raw = value.ok_or_else(|| ForecastError::InvalidRange(format!("missing {name}")))?;
    raw.parse::<DateTime<Utc>>()
        .map_err(|e| ForecastError::InvalidRange(format!("unparseable {name}: {e}")))
}

/// Kick off a training run over the stored history
async fn train(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.service.train().await {
        Ok(report) => (StatusCode::OK, Json(serde_json::json!(report))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// Hourly forecast for a station over [start, end)
async fn forecast(
    State(state): State<Arc<AppState>>,
    Path(station_id): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> impl IntoResponse {
    let range = parse_bound(query.start.as_deref(), "start")
        .and_then(|start| parse_bound(query.end.as_deref(), "end").map(|end| (start, end)));

    let (start, end) = match range {
        Ok(bounds) => bounds,
        Err(err) => return error_response(err).into_response(),
    };

    match state.service.predict(&station_id, start, end).await {
        Ok(points) => (StatusCode::OK, Json(serde_json::json!(points))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// Historical accuracy rollup plus model status
async fn model_performance(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.service.model_performance().await {
        Ok(summary) => (StatusCode::OK, Json(serde_json::json!(summary))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// Health check - degraded (but 200) until a model has been trained
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stored = state.service.stored_records().await.unwrap_or(0);
    let report = HealthReport::evaluate(state.service.model_state(), stored);
    (StatusCode::OK, Json(report))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/train", post(train))
        .route("/stations/:station_id/forecast", get(forecast))
        .route("/model/performance", get(model_performance))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

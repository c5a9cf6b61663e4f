//! Observability infrastructure for the forecaster
//!
//! Prometheus metrics (training/prediction latency, run and error counts,
//! forecast volume) and structured JSON event logging via tracing.

use prometheus::{register_histogram, register_int_gauge, Histogram, IntGauge};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ForecastMetricsInner> = OnceLock::new();

struct ForecastMetricsInner {
    training_latency_seconds: Histogram,
    prediction_latency_seconds: Histogram,
    training_runs: IntGauge,
    training_errors: IntGauge,
    forecast_points_generated: IntGauge,
    records_in_store: IntGauge,
}

impl ForecastMetricsInner {
    fn new() -> Self {
        Self {
            training_latency_seconds: register_histogram!(
                "demand_forecaster_training_latency_seconds",
                "Time spent fitting the demand model",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register training_latency_seconds"),

            prediction_latency_seconds: register_histogram!(
                "demand_forecaster_prediction_latency_seconds",
                "Time spent generating a forecast sequence",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            training_runs: register_int_gauge!(
                "demand_forecaster_training_runs_total",
                "Total number of completed training runs"
            )
            .expect("Failed to register training_runs"),

            training_errors: register_int_gauge!(
                "demand_forecaster_training_errors_total",
                "Total number of failed training attempts"
            )
            .expect("Failed to register training_errors"),

            forecast_points_generated: register_int_gauge!(
                "demand_forecaster_forecast_points_generated_total",
                "Total number of forecast points generated"
            )
            .expect("Failed to register forecast_points_generated"),

            records_in_store: register_int_gauge!(
                "demand_forecaster_records_in_store",
                "Number of demand records visible through the store"
            )
            .expect("Failed to register records_in_store"),
        }
    }
}

/// Forecaster metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct ForecastMetrics {
    _private: (),
}

impl Default for ForecastMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ForecastMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ForecastMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_training_latency(&self, duration_secs: f64) {
        self.inner().training_latency_seconds.observe(duration_secs);
    }

    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner()
            .prediction_latency_seconds
            .observe(duration_secs);
    }

    pub fn inc_training_runs(&self) {
        self.inner().training_runs.inc();
    }

    pub fn inc_training_errors(&self) {
        self.inner().training_errors.inc();
    }

    pub fn add_forecast_points(&self, count: i64) {
        self.inner().forecast_points_generated.add(count);
    }

    pub fn set_records_in_store(&self, count: i64) {
        self.inner().records_in_store.set(count);
    }
}

/// Structured logger for forecaster events
#[derive(Clone)]
pub struct StructuredLogger {
    instance: String,
}

impl StructuredLogger {
    pub fn new(instance: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
        }
    }

    /// Log a completed training run
    pub fn log_training_completed(&self, data_points: usize, final_status: &str) {
        info!(
            event = "training_completed",
            instance = %self.instance,
            data_points = data_points,
            status = %final_status,
            "Model training completed"
        );
    }

    /// Log a failed training attempt
    pub fn log_training_failed(&self, reason: &str) {
        warn!(
            event = "training_failed",
            instance = %self.instance,
            reason = %reason,
            "Model training failed"
        );
    }

    /// Log a served forecast request
    pub fn log_forecast_served(&self, station_id: &str, points: usize, duration_us: u64) {
        info!(
            event = "forecast_served",
            instance = %self.instance,
            station_id = %station_id,
            points = points,
            duration_us = duration_us,
            "Forecast request served"
        );
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str) {
        info!(
            event = "forecaster_started",
            instance = %self.instance,
            version = %version,
            "Demand forecaster started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "forecaster_shutdown",
            instance = %self.instance,
            reason = %reason,
            "Demand forecaster shutting down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_handle_records_observations() {
        let metrics = ForecastMetrics::new();
        metrics.observe_training_latency(0.02);
        metrics.observe_prediction_latency(0.001);
        metrics.inc_training_runs();
        metrics.inc_training_errors();
        metrics.add_forecast_points(24);
        metrics.set_records_in_store(120);
    }

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("test-instance");
        assert_eq!(logger.instance, "test-instance");
    }
}

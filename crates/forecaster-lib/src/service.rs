//! Transport-agnostic service facade
//!
//! Wires the storage boundary to the training job and the prediction
//! generator. The HTTP layer (or any other transport) only talks to this.

use crate::error::ForecastError;
use crate::forecast::{forecast_range, summarize_accuracy, ExogenousSource, TrainingJob};
use crate::models::{AccuracySummary, ForecastPoint, ModelState, TrainingReport};
use crate::observability::ForecastMetrics;
use crate::store::DemandStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct ForecastService {
    store: Arc<dyn DemandStore>,
    trainer: Arc<TrainingJob>,
    exogenous: Arc<dyn ExogenousSource>,
    metrics: ForecastMetrics,
}

impl ForecastService {
    pub fn new(
        store: Arc<dyn DemandStore>,
        exogenous: Arc<dyn ExogenousSource>,
        metrics: ForecastMetrics,
    ) -> Self {
        Self {
            store,
            trainer: Arc::new(TrainingJob::new()),
            exogenous,
            metrics,
        }
    }

    /// Fetch history and run a training pass
    ///
    /// The fit is CPU-bound and runs on the blocking pool so status reads
    /// and predictions stay responsive while it is in flight.
    pub async fn train(&self) -> Result<TrainingReport, ForecastError> {
        let records = self.store.fetch_all_demand_records().await?;
        debug!(records = records.len(), "Fetched history for training");

        let trainer = Arc::clone(&self.trainer);
        let start = Instant::now();
        let result = tokio::task::spawn_blocking(move || trainer.train(&records))
            .await
            .map_err(|e| ForecastError::Fit(format!("training task panicked: {e}")))?;

        match &result {
            Ok(report) => {
                self.metrics
                    .observe_training_latency(start.elapsed().as_secs_f64());
                self.metrics.inc_training_runs();
                info!(
                    status = ?report.status,
                    data_points = report.data_points,
                    "Training request completed"
                );
            }
            Err(_) => self.metrics.inc_training_errors(),
        }
        result
    }

    /// Generate hourly forecast points for a station over `[start, end)`
    pub async fn predict(
        &self,
        station_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        let station = self
            .store
            .fetch_station(station_id)
            .await?
            .ok_or_else(|| ForecastError::StationNotFound(station_id.to_string()))?;

        let timer = Instant::now();
        let model = self.trainer.model_snapshot();
        let points: Vec<ForecastPoint> =
            forecast_range(&model, start, end, self.exogenous.as_ref())?.collect();

        self.metrics
            .observe_prediction_latency(timer.elapsed().as_secs_f64());
        self.metrics.add_forecast_points(points.len() as i64);
        debug!(
            station = %station.id,
            points = points.len(),
            "Forecast generated"
        );
        Ok(points)
    }

    /// Rollup of historical forecast accuracy plus model status
    pub async fn model_performance(&self) -> Result<AccuracySummary, ForecastError> {
        let records = self.store.fetch_all_demand_records().await?;
        Ok(summarize_accuracy(&records, self.trainer.status().trained))
    }

    /// Training job state flags; pure read
    pub fn model_state(&self) -> ModelState {
        self.trainer.status()
    }

    /// Number of records currently visible through the store
    pub async fn stored_records(&self) -> Result<usize, ForecastError> {
        Ok(self.store.fetch_all_demand_records().await?.len())
    }

    #[doc(hidden)]
    pub fn trainer(&self) -> &Arc<TrainingJob> {
        &self.trainer
    }
}

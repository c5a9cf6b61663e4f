//! Training job and its concurrency guard
//!
//! Owns the single process-wide model. Exactly one fit may run at a time;
//! a second start request observes `already_training` and returns without
//! touching any state. Predictions keep reading the previous model while a
//! new fit is in progress; the swap happens atomically at completion.

use super::features::{extract_features, MIN_TRAINING_RECORDS};
use super::model::DemandModel;
use crate::error::ForecastError;
use crate::models::{DemandRecord, ModelState, TrainingReport, TrainingStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tracing::{debug, info, warn};

/// Owner of the model fit lifecycle
#[derive(Debug, Default)]
pub struct TrainingJob {
    model: RwLock<DemandModel>,
    trained: AtomicBool,
    training: AtomicBool,
}

/// Releases the training flag when the fit attempt ends, on any path
struct TrainingGuard<'a>(&'a AtomicBool);

impl Drop for TrainingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl TrainingJob {
    pub fn new() -> Self {
        Self {
            model: RwLock::new(DemandModel::untrained()),
            trained: AtomicBool::new(false),
            training: AtomicBool::new(false),
        }
    }

    /// Run a training pass over the given historical records
    ///
    /// Returns `AlreadyTraining` without side effects if a fit is in
    /// progress. Fails with `InsufficientData` below the usable-record
    /// threshold; a failed fit leaves any previously trained model intact.
    pub fn train(&self, records: &[DemandRecord]) -> Result<TrainingReport, ForecastError> {
        if self
            .training
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Training already in progress, returning without fitting");
            return Ok(TrainingReport {
                status: TrainingStatus::AlreadyTraining,
                data_points: 0,
                model_type: "linear".to_string(),
            });
        }
        let _guard = TrainingGuard(&self.training);

        let (features, targets) = extract_features(records);
        if features.len() < MIN_TRAINING_RECORDS {
            warn!(
                available = features.len(),
                required = MIN_TRAINING_RECORDS,
                "Not enough usable records to train"
            );
            return Err(ForecastError::InsufficientData {
                available: features.len(),
                required: MIN_TRAINING_RECORDS,
            });
        }

        let mut candidate = DemandModel::untrained();
        let mse = candidate.fit(&features, &targets)?;

        {
            let mut model = self.model.write().unwrap_or_else(|e| e.into_inner());
            *model = candidate;
        }
        self.trained.store(true, Ordering::SeqCst);

        info!(
            data_points = features.len(),
            final_mse = mse,
            "Model training completed"
        );

        Ok(TrainingReport {
            status: TrainingStatus::Success,
            data_points: features.len(),
            model_type: "linear".to_string(),
        })
    }

    /// Current state flags; pure read
    pub fn status(&self) -> ModelState {
        ModelState {
            trained: self.trained.load(Ordering::SeqCst),
            is_training: self.training.load(Ordering::SeqCst),
        }
    }

    /// Consistent snapshot of the current model
    pub fn model_snapshot(&self) -> DemandModel {
        self.model
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the model with explicitly fitted parameters (test support
    /// and model bootstrap)
    pub fn install_model(&self, model: DemandModel) {
        let trained = model.is_trained();
        {
            let mut current = self.model.write().unwrap_or_else(|e| e.into_inner());
            *current = model;
        }
        self.trained.store(trained, Ordering::SeqCst);
    }
}

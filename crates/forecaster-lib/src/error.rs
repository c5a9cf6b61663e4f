//! Error taxonomy for the forecasting pipeline
//!
//! Every error a caller can act on has its own variant; unclassified fit
//! failures are carried verbatim. A concurrent training start is not an
//! error at all and is reported through `TrainingStatus::AlreadyTraining`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    /// Training data below the minimum threshold; retry once more data exists
    #[error("insufficient training data: {available} usable records, need {required}")]
    InsufficientData { available: usize, required: usize },

    /// Prediction attempted before any successful training run
    #[error("model has not been trained yet")]
    ModelNotTrained,

    /// Station id did not resolve in the store
    #[error("station not found: {0}")]
    StationNotFound(String),

    /// Malformed forecast range (missing or unparseable bounds)
    #[error("invalid forecast range: {0}")]
    InvalidRange(String),

    /// Storage collaborator failure
    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),

    /// Unclassified failure during a model fit
    #[error("model fit failed: {0}")]
    Fit(String),
}

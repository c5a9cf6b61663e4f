//! Demand forecasting pipeline
//!
//! Feature extraction from historical records, the single-model training
//! lifecycle with its concurrency guard, lazy hourly forecast generation,
//! and accuracy rollups.

mod accuracy;
mod features;
mod generator;
mod model;
mod trainer;

pub use accuracy::summarize_accuracy;
pub use features::{extract_features, MIN_TRAINING_RECORDS};
pub use generator::{
    forecast_range, ExogenousSource, ForecastSeries, HourlyConditions, SyntheticConditions,
};
pub use model::{DemandModel, NUM_FEATURES, TRAINING_EPOCHS};
pub use trainer::TrainingJob;

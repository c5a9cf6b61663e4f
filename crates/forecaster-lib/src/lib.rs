//! Forecaster library for hourly grid demand prediction
//!
//! This crate provides the core functionality for:
//! - Feature extraction from historical demand records
//! - Linear model training with a single-run concurrency guard
//! - Lazy hourly forecast generation
//! - Forecast accuracy rollups
//! - Health checks and observability

pub mod error;
pub mod forecast;
pub mod health;
pub mod models;
pub mod observability;
pub mod service;
pub mod store;

pub use error::ForecastError;
pub use health::{HealthReport, ServiceStatus};
pub use models::*;
pub use observability::{ForecastMetrics, StructuredLogger};
pub use service::ForecastService;
pub use store::{DemandStore, MemoryStore};

//! Service health reporting
//!
//! The forecaster has two things worth reporting on: whether a trained
//! model is available and how much history the store currently holds.
//! An untrained model degrades the service rather than failing it; the
//! process can still train and report accuracy.

use crate::models::ModelState;
use serde::{Deserialize, Serialize};

/// Overall service status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Trained model available, forecasts can be served
    Ok,
    /// Operational but unable to serve forecasts yet
    Degraded,
}

/// Health report exposed at the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: ServiceStatus,
    pub model: ModelState,
    pub stored_records: usize,
}

impl HealthReport {
    pub fn evaluate(model: ModelState, stored_records: usize) -> Self {
        let status = if model.trained {
            ServiceStatus::Ok
        } else {
            ServiceStatus::Degraded
        };
        Self {
            status,
            model,
            stored_records,
        }
    }
}

//! Core data models for the demand forecaster

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A physical grid monitoring/forecast point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// One hourly observation/forecast pair for a station
///
/// `actual_demand` is absent for future or forecast-only rows; `accuracy`
/// is defined only when both actual and forecasted values exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandRecord {
    pub station_id: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub actual_demand: Option<f64>,
    pub forecasted_demand: f64,
    pub accuracy: Option<f64>,
}

impl DemandRecord {
    /// Hour of day (0-23), derived from the timestamp
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Day of week (0=Monday, 6=Sunday), derived from the timestamp
    pub fn day_of_week(&self) -> u32 {
        self.timestamp.weekday().num_days_from_monday()
    }
}

/// Accuracy score for a forecast against the observed value
///
/// `100 - |actual - forecasted|`; may be negative when the absolute
/// error exceeds 100.
pub fn accuracy_score(actual: f64, forecasted: f64) -> f64 {
    100.0 - (actual - forecasted).abs()
}

/// Feature vector consumed by the regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    pub temperature: f64,
    pub humidity: f64,
    pub day_of_week: f64,
    pub hour: f64,
    pub prior_demand: f64,
}

impl FeatureVector {
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.temperature,
            self.humidity,
            self.day_of_week,
            self.hour,
            self.prior_demand,
        ]
    }
}

/// One forward-looking forecast point, output-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub forecasted_demand: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub hour: u32,
    pub day_of_week: u32,
}

/// Outcome of a training request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    /// A fit ran to completion and the model was replaced
    Success,
    /// A fit was already in progress; nothing was changed
    AlreadyTraining,
}

/// Result of a training request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub status: TrainingStatus,
    pub data_points: usize,
    pub model_type: String,
}

/// Snapshot of the training job's state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelState {
    pub trained: bool,
    pub is_training: bool,
}

/// Whether the service currently holds a fitted model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Trained,
    NotTrained,
}

/// Rollup of historical forecast accuracy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub average_accuracy: f64,
    pub total_records: usize,
    pub model_status: ModelStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_time_fields_derive_from_timestamp() {
        // 2024-01-03 was a Wednesday
        let record = DemandRecord {
            station_id: "st-1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 3, 14, 0, 0).unwrap(),
            temperature: 21.0,
            humidity: 60.0,
            actual_demand: Some(100.0),
            forecasted_demand: 95.0,
            accuracy: Some(95.0),
        };
        assert_eq!(record.hour(), 14);
        assert_eq!(record.day_of_week(), 2);
    }

    #[test]
    fn test_accuracy_score() {
        assert_eq!(accuracy_score(100.0, 95.0), 95.0);
        assert_eq!(accuracy_score(95.0, 100.0), 95.0);
        // Error beyond 100 goes negative
        assert_eq!(accuracy_score(250.0, 100.0), -50.0);
    }

    #[test]
    fn test_feature_vector_ordering() {
        let features = FeatureVector {
            temperature: 20.0,
            humidity: 55.0,
            day_of_week: 3.0,
            hour: 12.0,
            prior_demand: 110.0,
        };
        assert_eq!(features.as_array(), [20.0, 55.0, 3.0, 12.0, 110.0]);
    }

    #[test]
    fn test_training_status_serialization() {
        let json = serde_json::to_string(&TrainingStatus::AlreadyTraining).unwrap();
        assert_eq!(json, "\"already_training\"");
        let json = serde_json::to_string(&ModelStatus::NotTrained).unwrap();
        assert_eq!(json, "\"not_trained\"");
    }
}

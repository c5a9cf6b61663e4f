//! Feature extraction for model training
//!
//! Converts historical demand records into fixed-width feature vectors and
//! their supervision targets. Records without an observed actual demand
//! cannot supervise a fit and are dropped from both outputs.

use crate::models::{DemandRecord, FeatureVector};

/// Minimum number of usable records required before a fit is attempted
pub const MIN_TRAINING_RECORDS: usize = 50;

/// Extract (features, targets) from historical records
///
/// Input order is preserved, so a store returning records in descending
/// timestamp order yields a reproducible training set. Pure; no side effects.
pub fn extract_features(records: &[DemandRecord]) -> (Vec<FeatureVector>, Vec<f64>) {
    let mut features = Vec::with_capacity(records.len());
    let mut targets = Vec::with_capacity(records.len());

    for record in records {
        let actual = match record.actual_demand {
            Some(v) => v,
            None => continue,
        };
        // Prior demand is the actual when one exists, the forecast otherwise;
        // here the actual is always present since unobserved rows are skipped.
        let prior_demand = actual;

        features.push(FeatureVector {
            temperature: record.temperature,
            humidity: record.humidity,
            day_of_week: record.day_of_week() as f64,
            hour: record.hour() as f64,
            prior_demand,
        });
        targets.push(actual);
    }

    (features, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_records(count: usize, with_actual: bool) -> Vec<DemandRecord> {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        (0..count)
            .map(|i| DemandRecord {
                station_id: "st-1".to_string(),
                timestamp: base - chrono::Duration::hours(i as i64),
                temperature: 18.0 + (i % 10) as f64,
                humidity: 50.0 + (i % 20) as f64,
                actual_demand: if with_actual {
                    Some(100.0 + (i % 30) as f64)
                } else {
                    None
                },
                forecasted_demand: 95.0 + (i % 30) as f64,
                accuracy: None,
            })
            .collect()
    }

    #[test]
    fn test_extract_pairs_features_with_targets() {
        let records = create_test_records(10, true);
        let (features, targets) = extract_features(&records);

        assert_eq!(features.len(), 10);
        assert_eq!(targets.len(), 10);
        assert_eq!(targets[0], 100.0);
        // prior_demand mirrors the actual when one exists
        assert_eq!(features[0].prior_demand, 100.0);
        assert_eq!(features[0].hour, records[0].hour() as f64);
        assert_eq!(features[0].day_of_week, records[0].day_of_week() as f64);
    }

    #[test]
    fn test_records_without_actual_are_excluded() {
        let mut records = create_test_records(5, true);
        records.extend(create_test_records(3, false));

        let (features, targets) = extract_features(&records);
        assert_eq!(features.len(), 5);
        assert_eq!(targets.len(), 5);
    }

    #[test]
    fn test_extraction_is_order_stable() {
        let records = create_test_records(20, true);
        let (first, _) = extract_features(&records);
        let (second, _) = extract_features(&records);

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.as_array(), b.as_array());
        }
    }

    #[test]
    fn test_empty_input() {
        let (features, targets) = extract_features(&[]);
        assert!(features.is_empty());
        assert!(targets.is_empty());
    }
}

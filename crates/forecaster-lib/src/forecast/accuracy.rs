//! Historical forecast accuracy rollup

use crate::models::{AccuracySummary, DemandRecord, ModelStatus};

/// Summarize accuracy scores already attached to stored records
///
/// The average covers only accuracy-bearing records (0 when there are
/// none); `total_records` counts the whole input. `model_status` is the
/// training job's current state, passed in rather than recomputed.
pub fn summarize_accuracy(records: &[DemandRecord], trained: bool) -> AccuracySummary {
    let scores: Vec<f64> = records.iter().filter_map(|r| r.accuracy).collect();
    let average_accuracy = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    AccuracySummary {
        average_accuracy,
        total_records: records.len(),
        model_status: if trained {
            ModelStatus::Trained
        } else {
            ModelStatus::NotTrained
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_record(accuracy: Option<f64>) -> DemandRecord {
        DemandRecord {
            station_id: "st-1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            temperature: 20.0,
            humidity: 55.0,
            actual_demand: accuracy.map(|_| 100.0),
            forecasted_demand: 98.0,
            accuracy,
        }
    }

    #[test]
    fn test_empty_record_set() {
        let summary = summarize_accuracy(&[], false);
        assert_eq!(summary.average_accuracy, 0.0);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.model_status, ModelStatus::NotTrained);
    }

    #[test]
    fn test_average_skips_records_without_accuracy() {
        let records = vec![
            create_test_record(Some(90.0)),
            create_test_record(None),
            create_test_record(Some(80.0)),
        ];
        let summary = summarize_accuracy(&records, true);

        // Average over the two scored records, total over all three
        assert_eq!(summary.average_accuracy, 85.0);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.model_status, ModelStatus::Trained);
    }

    #[test]
    fn test_all_records_unscored() {
        let records = vec![create_test_record(None), create_test_record(None)];
        let summary = summarize_accuracy(&records, false);
        assert_eq!(summary.average_accuracy, 0.0);
        assert_eq!(summary.total_records, 2);
    }
}

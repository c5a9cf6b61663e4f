//! Hourly forecast generation
//!
//! Walks an hourly grid from `start` (inclusive) to `end` (exclusive) and
//! emits one forecast point per hour, lazily. Exogenous conditions come
//! from an injected source so determinism is controlled by substitution.
//! An empty or inverted range yields an empty sequence, not an error.

use super::model::DemandModel;
use crate::error::ForecastError;
use crate::models::{FeatureVector, ForecastPoint};
use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

/// Per-hour exogenous inputs to the model
#[derive(Debug, Clone, Copy)]
pub struct HourlyConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub prior_demand: f64,
}

/// Supplier of exogenous conditions for a forecast hour
///
/// Implementations own their determinism; the generator reproduces a
/// sequence exactly when the source does.
pub trait ExogenousSource: Send + Sync {
    fn conditions_at(&self, timestamp: DateTime<Utc>) -> HourlyConditions;
}

/// Deterministic stand-in for a live weather/load feed
///
/// Smooth daily temperature, humidity and demand curves computed purely
/// from the timestamp, so repeated forecasts over the same range agree.
#[derive(Debug, Clone)]
pub struct SyntheticConditions {
    base_demand: f64,
}

impl Default for SyntheticConditions {
    fn default() -> Self {
        Self { base_demand: 100.0 }
    }
}

impl SyntheticConditions {
    pub fn new(base_demand: f64) -> Self {
        Self { base_demand }
    }
}

impl ExogenousSource for SyntheticConditions {
    fn conditions_at(&self, timestamp: DateTime<Utc>) -> HourlyConditions {
        let hour = timestamp.hour() as f64;
        let phase = |peak_hour: f64| {
            (std::f64::consts::TAU * (hour - peak_hour) / 24.0).cos()
        };
        HourlyConditions {
            // Warmest mid-afternoon, coldest before dawn
            temperature: 18.0 + 7.0 * phase(15.0),
            humidity: 60.0 - 15.0 * phase(15.0),
            // Evening demand peak
            prior_demand: self.base_demand * (1.0 + 0.2 * phase(18.0)),
        }
    }
}

/// Lazy, restartable sequence of hourly forecast points
pub struct ForecastSeries<'a, S: ExogenousSource + ?Sized> {
    model: DemandModel,
    source: &'a S,
    current: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl<S: ExogenousSource + ?Sized> Iterator for ForecastSeries<'_, S> {
    type Item = ForecastPoint;

    fn next(&mut self) -> Option<ForecastPoint> {
        if self.current >= self.end {
            return None;
        }
        let timestamp = self.current;
        self.current += Duration::hours(1);

        let conditions = self.source.conditions_at(timestamp);
        let features = FeatureVector {
            temperature: conditions.temperature,
            humidity: conditions.humidity,
            day_of_week: timestamp.weekday().num_days_from_monday() as f64,
            hour: timestamp.hour() as f64,
            prior_demand: conditions.prior_demand,
        };

        Some(ForecastPoint {
            timestamp,
            forecasted_demand: round_to(self.model.predict(&features), 2),
            temperature: round_to(conditions.temperature, 1),
            humidity: round_to(conditions.humidity, 0),
            hour: timestamp.hour(),
            day_of_week: timestamp.weekday().num_days_from_monday(),
        })
    }
}

/// Build the forecast sequence for `[start, end)`
///
/// Fails with `ModelNotTrained` before any computation if the model has
/// never been fitted.
pub fn forecast_range<'a, S: ExogenousSource + ?Sized>(
    model: &DemandModel,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    source: &'a S,
) -> Result<ForecastSeries<'a, S>, ForecastError> {
    if !model.is_trained() {
        return Err(ForecastError::ModelNotTrained);
    }
    Ok(ForecastSeries {
        model: model.clone(),
        source,
        current: start,
        end,
    })
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Source returning the same conditions for every hour
    struct FixedConditions(HourlyConditions);

    impl ExogenousSource for FixedConditions {
        fn conditions_at(&self, _timestamp: DateTime<Utc>) -> HourlyConditions {
            self.0
        }
    }

    fn fixed_source() -> FixedConditions {
        FixedConditions(HourlyConditions {
            temperature: 21.34,
            humidity: 58.6,
            prior_demand: 100.0,
        })
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_untrained_model_is_rejected() {
        let model = DemandModel::untrained();
        let source = fixed_source();
        let result = forecast_range(&model, t0(), t0() + Duration::hours(3), &source);
        assert!(matches!(result, Err(ForecastError::ModelNotTrained)));
    }

    #[test]
    fn test_three_hour_range_yields_three_points() {
        let model = DemandModel::with_parameters([0.0; 5], 42.567);
        let source = fixed_source();
        let points: Vec<ForecastPoint> =
            forecast_range(&model, t0(), t0() + Duration::hours(3), &source)
                .unwrap()
                .collect();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].timestamp, t0());
        assert_eq!(points[1].timestamp, t0() + Duration::hours(1));
        assert_eq!(points[2].timestamp, t0() + Duration::hours(2));
        assert_eq!(points[0].hour, 10);
        assert_eq!(points[1].hour, 11);
    }

    #[test]
    fn test_rounding_precision() {
        // Constant model predicts exactly the bias
        let model = DemandModel::with_parameters([0.0; 5], 42.567);
        let source = fixed_source();
        let point = forecast_range(&model, t0(), t0() + Duration::hours(1), &source)
            .unwrap()
            .next()
            .unwrap();

        assert_eq!(point.forecasted_demand, 42.57);
        assert_eq!(point.temperature, 21.3);
        assert_eq!(point.humidity, 59.0);
    }

    #[test]
    fn test_empty_and_inverted_ranges_yield_nothing() {
        let model = DemandModel::with_parameters([0.0; 5], 1.0);
        let source = fixed_source();

        let empty: Vec<_> = forecast_range(&model, t0(), t0(), &source)
            .unwrap()
            .collect();
        assert!(empty.is_empty());

        let inverted: Vec<_> =
            forecast_range(&model, t0(), t0() - Duration::hours(5), &source)
                .unwrap()
                .collect();
        assert!(inverted.is_empty());
    }

    #[test]
    fn test_sequence_is_restartable() {
        let model = DemandModel::with_parameters([0.1, 0.05, 1.0, 0.5, 0.8], 12.0);
        let source = SyntheticConditions::default();
        let end = t0() + Duration::hours(24);

        let first: Vec<ForecastPoint> = forecast_range(&model, t0(), end, &source)
            .unwrap()
            .collect();
        let second: Vec<ForecastPoint> = forecast_range(&model, t0(), end, &source)
            .unwrap()
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_day_boundary_rolls_hour_and_weekday() {
        let model = DemandModel::with_parameters([0.0; 5], 1.0);
        let source = fixed_source();
        let start = Utc.with_ymd_and_hms(2024, 6, 2, 23, 0, 0).unwrap();
        let points: Vec<ForecastPoint> =
            forecast_range(&model, start, start + Duration::hours(2), &source)
                .unwrap()
                .collect();

        // 2024-06-02 is a Sunday, 2024-06-03 a Monday
        assert_eq!(points[0].hour, 23);
        assert_eq!(points[0].day_of_week, 6);
        assert_eq!(points[1].hour, 0);
        assert_eq!(points[1].day_of_week, 0);
    }

    #[test]
    fn test_synthetic_conditions_are_deterministic() {
        let source = SyntheticConditions::default();
        let a = source.conditions_at(t0());
        let b = source.conditions_at(t0());
        assert_eq!(a.temperature, b.temperature);
        assert_eq!(a.humidity, b.humidity);
        assert_eq!(a.prior_demand, b.prior_demand);
    }
}

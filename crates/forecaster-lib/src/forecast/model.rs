//! Linear demand model
//!
//! A single dense layer (5 inputs, 1 output) fitted by full-batch gradient
//! descent on mean squared error. Features are used unscaled, so the
//! learning rate is sized for demand magnitudes in the hundreds.

use crate::error::ForecastError;
use crate::models::FeatureVector;
use serde::{Deserialize, Serialize};

/// Number of input features expected by the model
pub const NUM_FEATURES: usize = 5;

/// Fixed number of full-batch passes per fit
pub const TRAINING_EPOCHS: usize = 50;

/// Gradient descent step size
const LEARNING_RATE: f64 = 1e-6;

/// Fitted regression state plus the trained flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandModel {
    weights: [f64; NUM_FEATURES],
    bias: f64,
    trained: bool,
}

impl Default for DemandModel {
    fn default() -> Self {
        Self::untrained()
    }
}

impl DemandModel {
    /// Zero-weight model with the trained flag unset
    pub fn untrained() -> Self {
        Self {
            weights: [0.0; NUM_FEATURES],
            bias: 0.0,
            trained: false,
        }
    }

    /// Model with explicit parameters, marked trained
    pub fn with_parameters(weights: [f64; NUM_FEATURES], bias: f64) -> Self {
        Self {
            weights,
            bias,
            trained: true,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Fit against (features, targets) and mark the model trained
    ///
    /// Deterministic: fixed epoch count, no shuffling, no validation split.
    /// Returns the final mean squared error.
    pub fn fit(&mut self, features: &[FeatureVector], targets: &[f64]) -> Result<f64, ForecastError> {
        if features.len() != targets.len() {
            return Err(ForecastError::Fit(format!(
                "feature/target length mismatch: {} vs {}",
                features.len(),
                targets.len()
            )));
        }
        if features.is_empty() {
            return Err(ForecastError::Fit("empty training set".to_string()));
        }

        let inputs: Vec<[f64; NUM_FEATURES]> = features.iter().map(|f| f.as_array()).collect();
        let n = inputs.len() as f64;
        let mut mse = f64::MAX;

        for _ in 0..TRAINING_EPOCHS {
            let mut weight_grads = [0.0; NUM_FEATURES];
            let mut bias_grad = 0.0;
            let mut sum_sq_err = 0.0;

            for (x, &y) in inputs.iter().zip(targets.iter()) {
                let err = self.forward(x) - y;
                sum_sq_err += err * err;
                for (g, &xi) in weight_grads.iter_mut().zip(x.iter()) {
                    *g += 2.0 * err * xi;
                }
                bias_grad += 2.0 * err;
            }

            for (w, g) in self.weights.iter_mut().zip(weight_grads.iter()) {
                *w -= LEARNING_RATE * g / n;
            }
            self.bias -= LEARNING_RATE * bias_grad / n;
            mse = sum_sq_err / n;

            if !mse.is_finite() {
                return Err(ForecastError::Fit("loss diverged to non-finite".to_string()));
            }
        }

        self.trained = true;
        Ok(mse)
    }

    /// Predict a demand value for one feature vector
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.forward(&features.as_array())
    }

    fn forward(&self, x: &[f64; NUM_FEATURES]) -> f64 {
        self.weights
            .iter()
            .zip(x.iter())
            .map(|(w, xi)| w * xi)
            .sum::<f64>()
            + self.bias
    }
}

//! Linear regression

use crate::error::{ArtifactError, InferenceError, Result};
use crate::inference::{FeatureVector, N_FEATURES};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Ordinary least squares model: y = x · w + b
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegression {
    pub fn new(coefficients: [f64; N_FEATURES], intercept: f64) -> Self {
        Self {
            coefficients: coefficients.to_vec(),
            intercept,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ArtifactError> {
        let invalid = |reason: String| ArtifactError::Invalid {
            artifact: "linear_regression".to_string(),
            reason,
        };

        if self.coefficients.len() != N_FEATURES {
            return Err(invalid(format!(
                "expected {} coefficients, got {}",
                N_FEATURES,
                self.coefficients.len()
            )));
        }
        if let Some(i) = self.coefficients.iter().position(|w| !w.is_finite()) {
            return Err(invalid(format!("coefficient {} is not finite", i)));
        }
        if !self.intercept.is_finite() {
            return Err(invalid("intercept is not finite".to_string()));
        }
        Ok(())
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::Prediction(format!(
                "linear model expects {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        let weights = ArrayView1::from(&self.coefficients[..]);
        Ok(features.values().dot(&weights) + self.intercept)
    }
}

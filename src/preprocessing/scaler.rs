//! Feature scaling

use crate::artifacts::{self, check_feature_order};
use crate::error::{ArtifactError, InferenceError, Result};
use crate::inference::{FeatureVector, FEATURE_NAMES, N_FEATURES};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::FeatureTransform;

/// Statistic the scaler was fitted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerType {
    /// Standard scaling (z-score normalization): (x - mean) / std
    Standard,
    /// Min-Max scaling: (x - min) / (max - min)
    MinMax,
    /// Robust scaling using median and IQR
    Robust,
    /// Max absolute scaling: x / max(|x|)
    MaxAbs,
}

impl std::fmt::Display for ScalerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScalerType::Standard => "standard",
            ScalerType::MinMax => "min_max",
            ScalerType::Robust => "robust",
            ScalerType::MaxAbs => "max_abs",
        };
        f.write_str(name)
    }
}

/// Fitted parameters for one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    /// mean, min, median or 0 depending on the scaler type
    pub center: f64,
    /// std, range, IQR or max(|x|)
    pub scale: f64,
}

/// Fitted feature scaler, loaded from an artifact file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    scaler_type: ScalerType,
    feature_names: Vec<String>,
    params: Vec<ScalerParams>,
}

impl Scaler {
    /// Build a scaler over the canonical feature order
    pub fn new(scaler_type: ScalerType, params: [ScalerParams; N_FEATURES]) -> Self {
        Self {
            scaler_type,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            params: params.to_vec(),
        }
    }

    /// Standard scaler from per-feature means and standard deviations
    pub fn standard(mean: [f64; N_FEATURES], std: [f64; N_FEATURES]) -> Self {
        let params = std::array::from_fn(|i| ScalerParams {
            center: mean[i],
            scale: std[i],
        });
        Self::new(ScalerType::Standard, params)
    }

    /// Load and validate a scaler artifact
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ArtifactError> {
        let scaler: Self = artifacts::load(path)?;
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> std::result::Result<(), ArtifactError> {
        artifacts::save(self, path)
    }

    pub fn scaler_type(&self) -> ScalerType {
        self.scaler_type
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn params(&self) -> &[ScalerParams] {
        &self.params
    }

    /// Check the artifact against the canonical feature order and reject
    /// parameters that would produce non-finite output.
    pub fn validate(&self) -> std::result::Result<(), ArtifactError> {
        check_feature_order("scaler", &self.feature_names)?;

        if self.params.len() != N_FEATURES {
            return Err(ArtifactError::Invalid {
                artifact: "scaler".to_string(),
                reason: format!(
                    "expected {} parameter pairs, got {}",
                    N_FEATURES,
                    self.params.len()
                ),
            });
        }

        for (name, p) in self.feature_names.iter().zip(&self.params) {
            if !p.center.is_finite() || !p.scale.is_finite() || p.scale == 0.0 {
                return Err(ArtifactError::Invalid {
                    artifact: "scaler".to_string(),
                    reason: format!(
                        "feature '{}' has unusable parameters (center={}, scale={})",
                        name, p.center, p.scale
                    ),
                });
            }
        }

        Ok(())
    }
}

impl FeatureTransform for Scaler {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        if features.len() != self.params.len() {
            return Err(InferenceError::Prediction(format!(
                "scaler expects {} features, got {}",
                self.params.len(),
                features.len()
            )));
        }

        let scaled: Array1<f64> = features
            .values()
            .iter()
            .zip(&self.params)
            .map(|(v, p)| (v - p.center) / p.scale)
            .collect();

        Ok(scaled.into())
    }

    fn describe(&self) -> String {
        format!("{} scaler", self.scaler_type)
    }
}

//! Request pipeline: validate, order, scale, predict

use super::FeatureVector;
use crate::error::{InferenceError, Result};
use crate::models::Predictor;
use crate::preprocessing::FeatureTransform;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Stateless prediction pipeline over shared, immutable artifacts.
///
/// Cloning is cheap; clones share the same predictor and scaler.
#[derive(Clone)]
pub struct InferencePipeline {
    model: Arc<dyn Predictor>,
    scaler: Option<Arc<dyn FeatureTransform>>,
}

impl std::fmt::Debug for InferencePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferencePipeline")
            .field("scaler", &self.scaler.as_ref().map(|s| s.describe()))
            .finish_non_exhaustive()
    }
}

impl InferencePipeline {
    /// Pipeline that feeds raw features to the model
    pub fn new(model: Arc<dyn Predictor>) -> Self {
        Self { model, scaler: None }
    }

    /// Apply `scaler` to every vector before prediction
    pub fn with_scaler(mut self, scaler: Arc<dyn FeatureTransform>) -> Self {
        self.scaler = Some(scaler);
        self
    }

    pub fn is_scaled(&self) -> bool {
        self.scaler.is_some()
    }

    /// Predict from named request fields.
    ///
    /// Validation failures are returned before the model is touched.
    pub fn predict(&self, fields: &Map<String, Value>) -> Result<f64> {
        let features = FeatureVector::from_fields(fields)?;
        self.predict_vector(&features)
    }

    /// Predict from an already ordered vector
    pub fn predict_vector(&self, features: &FeatureVector) -> Result<f64> {
        let prediction = match &self.scaler {
            Some(scaler) => {
                let scaled = scaler.transform(features)?;
                self.model.predict(&scaled)?
            }
            None => self.model.predict(features)?,
        };

        if !prediction.is_finite() {
            return Err(InferenceError::Prediction(format!(
                "model produced a non-finite value ({})",
                prediction
            )));
        }
        Ok(prediction)
    }
}

//! Feature vector assembly
//!
//! The order of [`FEATURE_NAMES`] is the training-time column order of the
//! California housing dataset. Every artifact is checked against it at load
//! time, and request payloads are reordered into it before prediction.

use crate::error::{InferenceError, Result};
use ndarray::Array1;
use serde_json::{Map, Value};

/// Number of input features expected by every artifact
pub const N_FEATURES: usize = 8;

/// Canonical feature order
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "Population",
    "AveOccup",
    "Latitude",
    "Longitude",
];

/// Ordered numeric input for a single prediction
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Array1<f64>);

impl FeatureVector {
    /// Validate named fields and assemble them in canonical order.
    ///
    /// Fields not listed in [`FEATURE_NAMES`] are ignored. Missing fields are
    /// reported together before any value is type-checked.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut values = Vec::with_capacity(N_FEATURES);
        let mut invalid = None;

        for name in FEATURE_NAMES {
            match fields.get(name) {
                None => missing.push(name.to_string()),
                Some(value) => match value.as_f64() {
                    Some(v) => values.push(v),
                    None => {
                        invalid.get_or_insert_with(|| {
                            format!(
                                "feature '{}' must be a number, got {}",
                                name,
                                json_type(value)
                            )
                        });
                    }
                },
            }
        }

        if !missing.is_empty() {
            return Err(InferenceError::MissingFeatures(missing));
        }
        if let Some(reason) = invalid {
            return Err(InferenceError::InvalidInput(reason));
        }

        Ok(Self(Array1::from_vec(values)))
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.0
    }
}

impl From<[f64; N_FEATURES]> for FeatureVector {
    fn from(values: [f64; N_FEATURES]) -> Self {
        Self(Array1::from_vec(values.to_vec()))
    }
}

impl From<Array1<f64>> for FeatureVector {
    fn from(values: Array1<f64>) -> Self {
        Self(values)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

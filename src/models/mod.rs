//! Model artifacts
//!
//! Estimators are fitted offline and persisted as tagged JSON documents.
//! This module only evaluates them:
//! - Linear regression
//! - Regression trees and random forests

pub mod decision_tree;
pub mod linear_models;
pub mod random_forest;

pub use decision_tree::{DecisionTree, TreeNode};
pub use linear_models::LinearRegression;
pub use random_forest::RandomForest;

use crate::artifacts::{self, check_feature_order};
use crate::error::{ArtifactError, Result};
use crate::inference::{FeatureVector, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Anything that maps an ordered feature vector to a scalar.
///
/// Implementations are shared across request handlers and must be safe to
/// call concurrently without locking.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64>;
}

/// Concrete estimator stored in a model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LinearRegression(LinearRegression),
    RandomForest(RandomForest),
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LinearRegression(_) => "linear_regression",
            Estimator::RandomForest(_) => "random_forest",
        }
    }
}

/// A fitted model as written by the training job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    /// Whether the model was fitted on scaled features and must be paired
    /// with a scaler artifact
    #[serde(default)]
    pub expects_scaled_input: bool,
    pub estimator: Estimator,
}

impl ModelArtifact {
    /// Wrap an estimator that consumes raw features
    pub fn new(estimator: Estimator) -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            expects_scaled_input: false,
            estimator,
        }
    }

    /// Mark the model as fitted on scaled features
    pub fn scaled(mut self) -> Self {
        self.expects_scaled_input = true;
        self
    }

    /// Load and validate a model artifact
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ArtifactError> {
        let model: Self = artifacts::load(path)?;
        model.validate()?;
        Ok(model)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> std::result::Result<(), ArtifactError> {
        artifacts::save(self, path)
    }

    pub fn kind(&self) -> &'static str {
        self.estimator.kind()
    }

    pub fn validate(&self) -> std::result::Result<(), ArtifactError> {
        check_feature_order("model", &self.feature_names)?;
        match &self.estimator {
            Estimator::LinearRegression(model) => model.validate(),
            Estimator::RandomForest(model) => model.validate(),
        }
    }
}

impl Predictor for ModelArtifact {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        match &self.estimator {
            Estimator::LinearRegression(model) => model.predict(features),
            Estimator::RandomForest(model) => model.predict(features),
        }
    }
}

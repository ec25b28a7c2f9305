//! Random forest regression

use super::decision_tree::DecisionTree;
use crate::error::{ArtifactError, InferenceError, Result};
use crate::inference::{FeatureVector, N_FEATURES};
use serde::{Deserialize, Serialize};

/// Averaging ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(trees: Vec<DecisionTree>) -> Self {
        Self { trees }
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Total leaf count across all trees
    pub fn n_leaves(&self) -> usize {
        self.trees().iter().map(DecisionTree::n_leaves).sum()
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }

    pub fn validate(&self) -> std::result::Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::Invalid {
                artifact: "random_forest".to_string(),
                reason: "forest has no trees".to_string(),
            });
        }
        self.trees.iter().try_for_each(DecisionTree::validate)
    }

    /// Mean of the per-tree predictions
    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != N_FEATURES {
            return Err(InferenceError::Prediction(format!(
                "random forest expects {} features, got {}",
                N_FEATURES,
                features.len()
            )));
        }
        if self.trees.is_empty() {
            return Err(InferenceError::Prediction("forest has no trees".to_string()));
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict(features)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

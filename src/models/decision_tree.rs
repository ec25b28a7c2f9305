//! Regression tree evaluation

use crate::error::{ArtifactError, InferenceError, Result};
use crate::inference::{FeatureVector, N_FEATURES};
use serde::{Deserialize, Serialize};

/// Tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Leaf node with prediction value
    Leaf { value: f64 },
    /// Internal node; samples with `x[feature_idx] <= threshold` go left
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(value: f64) -> Self {
        TreeNode::Leaf { value }
    }

    pub fn split(feature_idx: usize, threshold: f64, left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Split {
            feature_idx,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub root: TreeNode,
}

impl DecisionTree {
    pub fn new(root: TreeNode) -> Self {
        Self { root }
    }

    /// Walk from the root to a leaf. A split on a feature the vector does not
    /// have is reported instead of indexing out of bounds.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let x = features.values();
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split { feature_idx, threshold, left, right } => {
                    let value = x.get(*feature_idx).ok_or_else(|| {
                        InferenceError::Prediction(format!(
                            "tree splits on feature index {} but the input has {} features",
                            feature_idx,
                            x.len()
                        ))
                    })?;
                    node = if *value <= *threshold { &**left } else { &**right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        fn node_depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => 1 + node_depth(left).max(node_depth(right)),
            }
        }
        node_depth(&self.root)
    }

    pub fn n_leaves(&self) -> usize {
        fn count(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }

    pub fn validate(&self) -> std::result::Result<(), ArtifactError> {
        fn check(node: &TreeNode) -> std::result::Result<(), String> {
            match node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    Err("leaf value is not finite".to_string())
                }
                TreeNode::Leaf { .. } => Ok(()),
                TreeNode::Split { feature_idx, threshold, left, right } => {
                    if *feature_idx >= N_FEATURES {
                        return Err(format!(
                            "split on feature index {} but only {} features exist",
                            feature_idx, N_FEATURES
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("split on feature {} has non-finite threshold", feature_idx));
                    }
                    check(left)?;
                    check(right)
                }
            }
        }

        check(&self.root).map_err(|reason| ArtifactError::Invalid {
            artifact: "decision_tree".to_string(),
            reason,
        })
    }
}

//! housing-predict - California housing price prediction service
//!
//! Serves a regression model fitted offline on the California housing
//! dataset. A request carries eight named features; the service validates
//! them, orders them into the training-time feature vector, optionally scales
//! them and returns the model's estimate of the median house value.
//!
//! # Modules
//!
//! - [`artifacts`] - Loading the model and optional scaler at startup
//! - [`inference`] - Feature validation and the prediction pipeline
//! - [`models`] - Model artifacts (linear regression, random forest)
//! - [`preprocessing`] - Feature scaling
//! - [`server`] - HTTP API
//! - [`cli`] - Command-line interface

pub mod error;

pub mod artifacts;
pub mod inference;
pub mod models;
pub mod preprocessing;

pub mod server;
pub mod cli;

pub use error::{ArtifactError, InferenceError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ArtifactError, InferenceError, Result};

    pub use crate::artifacts::{ArtifactConfig, ArtifactStore, FeatureScaling};
    pub use crate::inference::{FeatureVector, InferencePipeline, FEATURE_NAMES, N_FEATURES};
    pub use crate::models::{
        DecisionTree, Estimator, LinearRegression, ModelArtifact, Predictor, RandomForest, TreeNode,
    };
    pub use crate::preprocessing::{FeatureTransform, Scaler, ScalerParams, ScalerType};
    pub use crate::server::{create_router, run_server, AppState, ServerConfig};
}

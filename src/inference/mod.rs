//! Inference module
//!
//! Turns a named-field request payload into a prediction:
//! - completeness and type validation of the eight housing features
//! - assembly into the fixed training-time feature order
//! - optional scaling with the configured scaler artifact
//! - evaluation of the model artifact

mod features;
mod pipeline;

pub use features::{FeatureVector, FEATURE_NAMES, N_FEATURES};
pub use pipeline::InferencePipeline;

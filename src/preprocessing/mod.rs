//! Feature preprocessing
//!
//! Transforms applied to an ordered feature vector before it reaches the
//! model. The only concrete transform is the fitted [`Scaler`].

mod scaler;

pub use scaler::{Scaler, ScalerParams, ScalerType};

use crate::error::Result;
use crate::inference::FeatureVector;

/// A fitted, read-only transform over feature vectors.
///
/// Implementations must hold no per-call mutable state so a single instance
/// can be shared across request handlers.
pub trait FeatureTransform: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector>;

    /// Short human-readable description for logs and health output
    fn describe(&self) -> String;
}

//! Artifact configuration

use std::fmt;
use std::path::PathBuf;

/// How raw features are mapped to model input.
///
/// This is fixed per artifact pair: a model fitted on scaled features must be
/// served with the scaler it was fitted against, and a model fitted on raw
/// features must be served without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureScaling {
    /// Raw features go straight to the model
    Identity,
    /// Features pass through the scaler stored at this path
    Scaler(PathBuf),
}

impl FeatureScaling {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => FeatureScaling::Scaler(path),
            None => FeatureScaling::Identity,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, FeatureScaling::Identity)
    }
}

impl fmt::Display for FeatureScaling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureScaling::Identity => f.write_str("identity"),
            FeatureScaling::Scaler(path) => write!(f, "scaler({})", path.display()),
        }
    }
}

/// Location of the artifact pair to serve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub scaling: FeatureScaling,
}

impl ArtifactConfig {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            scaling: FeatureScaling::Identity,
        }
    }

    pub fn with_scaler(mut self, scaler_path: impl Into<PathBuf>) -> Self {
        self.scaling = FeatureScaling::Scaler(scaler_path.into());
        self
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        let model_path = std::env::var("MODEL_PATH")
            .unwrap_or_else(|_| "models/linear/model.json".to_string());
        let scaler_path = std::env::var("SCALER_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Self {
            model_path: PathBuf::from(model_path),
            scaling: FeatureScaling::from_path(scaler_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ArtifactConfig::new("m.json");
        assert!(config.scaling.is_identity());

        let config = config.with_scaler("s.json");
        assert_eq!(config.scaling, FeatureScaling::Scaler(PathBuf::from("s.json")));
    }

    #[test]
    fn test_scaling_display() {
        assert_eq!(FeatureScaling::Identity.to_string(), "identity");
        assert_eq!(
            FeatureScaling::Scaler(PathBuf::from("models/scaler.json")).to_string(),
            "scaler(models/scaler.json)"
        );
    }
}

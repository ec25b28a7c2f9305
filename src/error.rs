//! Error types for artifact loading and inference

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for inference operations
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Errors raised by the inference pipeline.
///
/// `MissingFeatures` and `InvalidInput` are caused by the caller and can be
/// corrected by fixing the request. `Prediction` means the loaded artifacts
/// could not produce a value for a well-formed vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Missing required features: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prediction error: {0}")]
    Prediction(String),
}

impl InferenceError {
    /// Whether the caller can fix this error by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            InferenceError::MissingFeatures(_) | InferenceError::InvalidInput(_)
        )
    }
}

/// Errors raised while loading artifacts at startup. All of them are fatal.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt artifact {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Feature order mismatch in {artifact}: expected [{expected}], got [{actual}]")]
    FeatureMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid {artifact} artifact: {reason}")]
    Invalid { artifact: String, reason: String },

    #[error("Scaling mismatch: {0}")]
    ScalingMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_features_display() {
        let err = InferenceError::MissingFeatures(vec![
            "Latitude".to_string(),
            "Longitude".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required features: Latitude, Longitude"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(InferenceError::MissingFeatures(vec![]).is_client_error());
        assert!(InferenceError::InvalidInput("x".into()).is_client_error());
        assert!(!InferenceError::Prediction("x".into()).is_client_error());
    }

    #[test]
    fn test_artifact_io_display_names_path() {
        let err = ArtifactError::Io {
            path: PathBuf::from("models/model.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("models/model.json"));
        assert!(msg.contains("file not found"));
    }
}

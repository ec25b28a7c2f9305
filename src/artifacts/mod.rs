//! Artifact store
//!
//! Loads the model and optional scaler produced by the offline training job.
//! Artifacts are read once at startup and never change afterwards; a new
//! model means a process restart.

mod config;
mod store;

pub use config::{ArtifactConfig, FeatureScaling};
pub use store::{ArtifactStore, ArtifactSummary};

use crate::error::ArtifactError;
use crate::inference::FEATURE_NAMES;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// Read and decode a JSON artifact
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ArtifactError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| ArtifactError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Write an artifact as pretty-printed JSON
pub fn save<T: Serialize>(artifact: &T, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(artifact).map_err(|source| ArtifactError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Ensure an artifact was fitted on the canonical feature order
pub fn check_feature_order(artifact: &str, names: &[String]) -> Result<(), ArtifactError> {
    if names.iter().map(String::as_str).eq(FEATURE_NAMES.iter().copied()) {
        return Ok(());
    }
    Err(ArtifactError::FeatureMismatch {
        artifact: artifact.to_string(),
        expected: FEATURE_NAMES.join(", "),
        actual: names.join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load::<serde_json::Value>(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"\x80\x04\x95 not json").unwrap();

        let err = load::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. } | ArtifactError::Format { .. }));
    }

    #[test]
    fn test_feature_order_check() {
        let canonical: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        assert!(check_feature_order("model", &canonical).is_ok());
        assert!(check_feature_order("model", &canonical[..7]).is_err());

        let mut reversed = canonical.clone();
        reversed.reverse();
        let err = check_feature_order("scaler", &reversed).unwrap_err();
        assert!(err.to_string().contains("scaler"));
    }
}

//! Process-wide read-only artifact holder

use super::{ArtifactConfig, FeatureScaling};
use crate::error::ArtifactError;
use crate::inference::InferencePipeline;
use crate::models::ModelArtifact;
use crate::preprocessing::{FeatureTransform, Scaler};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Description of the loaded artifact pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactSummary {
    pub model: String,
    pub expects_scaled_input: bool,
    pub scaling: String,
}

/// Loaded model and optional scaler.
///
/// Both are immutable after [`ArtifactStore::open`] returns and can be shared
/// freely between threads.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    model: Arc<ModelArtifact>,
    scaler: Option<Arc<Scaler>>,
}

impl ArtifactStore {
    /// Load the configured artifact pair. Any failure here means the service
    /// cannot start.
    pub fn open(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        info!(
            model_path = %config.model_path.display(),
            scaling = %config.scaling,
            "Loading artifacts"
        );

        let model = ModelArtifact::load(&config.model_path)?;
        let scaler = match &config.scaling {
            FeatureScaling::Identity => None,
            FeatureScaling::Scaler(path) => Some(Scaler::load(path)?),
        };

        let store = Self::from_parts(model, scaler)?;
        let summary = store.summary();
        info!(
            model = %summary.model,
            scaling = %summary.scaling,
            "Artifacts loaded"
        );
        Ok(store)
    }

    /// Pair already-decoded artifacts. Both are validated, and scaler presence
    /// must match what the model was fitted on.
    pub fn from_parts(model: ModelArtifact, scaler: Option<Scaler>) -> Result<Self, ArtifactError> {
        model.validate()?;
        if let Some(scaler) = &scaler {
            scaler.validate()?;
        }

        match (model.expects_scaled_input, scaler.is_some()) {
            (true, false) => Err(ArtifactError::ScalingMismatch(format!(
                "{} model was fitted on scaled features but no scaler is configured",
                model.kind()
            ))),
            (false, true) => Err(ArtifactError::ScalingMismatch(format!(
                "{} model was fitted on raw features but a scaler is configured",
                model.kind()
            ))),
            _ => Ok(Self {
                model: Arc::new(model),
                scaler: scaler.map(Arc::new),
            }),
        }
    }

    pub fn model(&self) -> &ModelArtifact {
        &self.model
    }

    pub fn scaler(&self) -> Option<&Scaler> {
        self.scaler.as_deref()
    }

    /// Build the request pipeline over the shared artifacts
    pub fn pipeline(&self) -> InferencePipeline {
        let pipeline = InferencePipeline::new(self.model.clone());
        match &self.scaler {
            Some(scaler) => pipeline.with_scaler(scaler.clone()),
            None => pipeline,
        }
    }

    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            model: self.model.kind().to_string(),
            expects_scaled_input: self.model.expects_scaled_input,
            scaling: self
                .scaler
                .as_ref()
                .map(|s| s.describe())
                .unwrap_or_else(|| "identity".to_string()),
        }
    }
}

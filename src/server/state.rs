//! Application state

use crate::artifacts::{ArtifactConfig, ArtifactStore, ArtifactSummary};
use crate::error::ArtifactError;
use crate::inference::InferencePipeline;

/// Application state shared across handlers.
///
/// Everything here is read-only once the server starts, so handlers take no
/// locks.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pipeline: InferencePipeline,
    pub artifacts: ArtifactSummary,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(pipeline: InferencePipeline, artifacts: ArtifactSummary) -> Self {
        Self {
            pipeline,
            artifacts,
            started_at: chrono::Utc::now(),
        }
    }

    /// Load the configured artifact pair and build the state around it
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        let store = ArtifactStore::open(config)?;
        Ok(Self::from_store(&store))
    }

    pub fn from_store(store: &ArtifactStore) -> Self {
        Self::new(store.pipeline(), store.summary())
    }

    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

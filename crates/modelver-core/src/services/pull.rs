//! File and model pull operations.
//!
//! These fetch whatever the working-tree pointer currently describes. They
//! never touch revision control or the registry.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{ArtifactRecord, PointerRef};
use crate::error::CoreError;
use crate::ports::{ArtifactTrackerPort, RegistryStorePort, TrackerError};
use crate::utils::validation::{require_non_empty, resolve_pull_target};

/// Result of a successful pull.
#[derive(Debug, Clone)]
pub struct PullOutcome {
    pub model: String,
    /// Path that was materialized (the model path, or one file inside it).
    pub path: PathBuf,
    /// Pointer that was materialized.
    pub pointer: PointerRef,
    /// Registered version whose digest matches the pointer, if any.
    pub version: Option<String>,
}

/// Service fetching artifact content for a model.
pub struct PullService {
    store: Arc<dyn RegistryStorePort>,
    tracker: Arc<dyn ArtifactTrackerPort>,
}

impl PullService {
    pub fn new(store: Arc<dyn RegistryStorePort>, tracker: Arc<dyn ArtifactTrackerPort>) -> Self {
        Self { store, tracker }
    }

    /// Fetch the whole tracked path of `model`.
    pub fn pull_model(&self, model: &str) -> Result<PullOutcome, CoreError> {
        self.pull(model, None)
    }

    /// Fetch one file inside the tracked directory of `model`.
    ///
    /// `file` is relative to the model directory, or already prefixed by it.
    pub fn pull_file(&self, model: &str, file: &str) -> Result<PullOutcome, CoreError> {
        self.pull(model, Some(file))
    }

    fn pull(&self, model: &str, file: Option<&str>) -> Result<PullOutcome, CoreError> {
        let model = require_non_empty("model", model)?;
        let registry = self.store.load()?;
        let latest = registry
            .latest(model)
            .ok_or_else(|| CoreError::not_found(model, "latest"))?;

        let target = file
            .map(|f| resolve_pull_target(&latest.path, f))
            .transpose()?;

        let pointer = self
            .tracker
            .current(&latest.pointer_ref.file)
            .map_err(|source| materialize_failed(latest, source))?;
        debug!(
            pointer = %pointer.file.display(),
            digest = %pointer.short_digest(),
            target = ?target,
            "Materializing working-tree pointer"
        );
        self.tracker
            .materialize(&pointer, target.as_deref())
            .map_err(|source| materialize_failed(latest, source))?;

        let version = registry
            .version_with_digest(model, &pointer.digest)
            .map(|r| r.version.clone());
        let path = target.unwrap_or_else(|| latest.path.clone());
        info!(model, path = %path.display(), version = ?version, "Pulled");

        Ok(PullOutcome {
            model: model.to_string(),
            path,
            pointer,
            version,
        })
    }
}

fn materialize_failed(record: &ArtifactRecord, source: TrackerError) -> CoreError {
    CoreError::MaterializeFailed {
        model: record.model.clone(),
        version: record.version.clone(),
        source,
    }
}

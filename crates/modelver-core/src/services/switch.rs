//! Switch orchestrator.
//!
//! Restores the pointer file of a registered version from history and,
//! optionally, fetches the content it describes.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{ArtifactRecord, VersionRegistry};
use crate::error::CoreError;
use crate::ports::{ArtifactTrackerPort, RegistryStorePort, RevisionControlPort, TrackerError};
use crate::utils::validation::require_non_empty;

/// A request to switch a model to a registered version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchRequest {
    pub model: String,
    pub version: String,
    /// Also fetch the content into the working tree.
    pub pull: bool,
    /// Overwrite a working-tree pointer that matches no registered version.
    pub force: bool,
}

impl SwitchRequest {
    pub fn new(model: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            version: version.into(),
            pull: false,
            force: false,
        }
    }

    #[must_use]
    pub const fn with_pull(mut self, pull: bool) -> Self {
        self.pull = pull;
        self
    }

    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Pointer state found in the working tree before switching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkingTreeState {
    /// No pointer file present.
    Missing,
    /// Already at the requested version.
    Matches,
    /// At another registered version.
    Registered { version: String },
    /// Pointer digest belongs to no registered version of the model.
    Unregistered { digest: String },
    /// Pointer file exists but could not be read.
    Unreadable { reason: String },
}

impl WorkingTreeState {
    /// Whether switching would discard state the registry cannot restore.
    pub const fn has_unregistered_work(&self) -> bool {
        matches!(self, Self::Unregistered { .. } | Self::Unreadable { .. })
    }
}

/// How far the switch went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// Pointer file restored; content not fetched.
    PointerRestored,
    /// Pointer file restored and content fetched.
    Materialized,
}

/// Result of a successful switch.
#[derive(Debug, Clone)]
pub struct SwitchOutcome {
    pub record: ArtifactRecord,
    pub state: SwitchState,
    pub previous: WorkingTreeState,
}

/// Service switching models between registered versions.
pub struct SwitchService {
    store: Arc<dyn RegistryStorePort>,
    tracker: Arc<dyn ArtifactTrackerPort>,
    vcs: Arc<dyn RevisionControlPort>,
}

impl SwitchService {
    pub fn new(
        store: Arc<dyn RegistryStorePort>,
        tracker: Arc<dyn ArtifactTrackerPort>,
        vcs: Arc<dyn RevisionControlPort>,
    ) -> Self {
        Self {
            store,
            tracker,
            vcs,
        }
    }

    /// Switch `model` to `version`.
    ///
    /// Idempotent: switching twice to the same version leaves the same state.
    /// The registry is never modified.
    pub fn switch(&self, request: &SwitchRequest) -> Result<SwitchOutcome, CoreError> {
        let model = require_non_empty("model", &request.model)?;
        let version = require_non_empty("version", &request.version)?;

        let registry = self.store.load()?;
        let record = registry
            .find(model, version)
            .cloned()
            .ok_or_else(|| CoreError::not_found(model, version))?;

        let previous = self.inspect_working_tree(&registry, &record);
        if previous.has_unregistered_work() {
            if !request.force {
                return Err(CoreError::invalid(format!(
                    "{} holds a version of '{model}' that is not registered ({}); register it or pass --force",
                    record.pointer_ref.file.display(),
                    describe(&previous)
                )));
            }
            warn!(
                pointer = %record.pointer_ref.file.display(),
                state = ?previous,
                "Overwriting unregistered pointer"
            );
        }

        debug!(revision = %record.revision_id, pointer = %record.pointer_ref.file.display(), "Restoring pointer");
        self.vcs
            .checkout(&record.revision_id, std::slice::from_ref(&record.pointer_ref.file))
            .map_err(|source| CoreError::CheckoutFailed {
                model: record.model.clone(),
                version: record.version.clone(),
                revision: record.revision_id.clone(),
                source,
            })?;

        let state = if request.pull {
            debug!(digest = %record.pointer_ref.short_digest(), "Materializing content");
            self.tracker
                .materialize(&record.pointer_ref, None)
                .map_err(|source| CoreError::MaterializeFailed {
                    model: record.model.clone(),
                    version: record.version.clone(),
                    source,
                })?;
            SwitchState::Materialized
        } else {
            SwitchState::PointerRestored
        };

        info!(model = %record.model, version = %record.version, state = ?state, "Switched version");
        Ok(SwitchOutcome {
            record,
            state,
            previous,
        })
    }

    fn inspect_working_tree(
        &self,
        registry: &VersionRegistry,
        record: &ArtifactRecord,
    ) -> WorkingTreeState {
        match self.tracker.current(&record.pointer_ref.file) {
            Ok(current) if current.digest == record.pointer_ref.digest => WorkingTreeState::Matches,
            Ok(current) => registry
                .version_with_digest(&record.model, &current.digest)
                .map_or(
                    WorkingTreeState::Unregistered {
                        digest: current.digest.clone(),
                    },
                    |r| WorkingTreeState::Registered {
                        version: r.version.clone(),
                    },
                ),
            Err(TrackerError::PathNotFound(_)) => WorkingTreeState::Missing,
            Err(e) => WorkingTreeState::Unreadable {
                reason: e.to_string(),
            },
        }
    }
}

fn describe(state: &WorkingTreeState) -> String {
    match state {
        WorkingTreeState::Unregistered { digest } => format!("digest {digest}"),
        WorkingTreeState::Unreadable { reason } => reason.clone(),
        other => format!("{other:?}"),
    }
}

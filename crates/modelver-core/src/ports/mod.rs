//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the orchestrators expect from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No process spawning or file-format details in any signature
//! - Paths are always relative to the project root
//! - Adapter errors are typed so orchestrators can wrap them with context

pub mod artifact_tracker;
pub mod registry_store;
pub mod revision_control;

use std::sync::Arc;

pub use artifact_tracker::{ArtifactTrackerPort, TrackerError};
pub use registry_store::RegistryStorePort;
pub use revision_control::{RevisionControlPort, VcsError};

/// Container for the three adapters every orchestrator needs.
///
/// It lives in `modelver-core` so that `AppCore` can accept it without
/// depending on the crates that implement the ports.
///
/// # Example
///
/// ```ignore
/// let ports = Ports::new(
///     Arc::new(JsonRegistryStore::new(registry_path)),
///     Arc::new(DvcArtifactTracker::new(&root, dvc)),
///     Arc::new(GitRevisionControl::new(&root, git)),
/// );
/// let core = AppCore::new(ports, root, settings);
/// ```
#[derive(Clone)]
pub struct Ports {
    /// Registry persistence.
    pub store: Arc<dyn RegistryStorePort>,
    /// Content-addressed artifact tracker.
    pub tracker: Arc<dyn ArtifactTrackerPort>,
    /// Revision control.
    pub vcs: Arc<dyn RevisionControlPort>,
}

impl Ports {
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
}

//! Publish a registered version to remote storage.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ArtifactRecord;
use crate::error::{CoreError, PublishError};
use crate::ports::{ArtifactTrackerPort, RegistryStorePort, RevisionControlPort};
use crate::utils::validation::require_non_empty;

/// Service pushing artifact content and history to their remotes.
pub struct PublishService {
    store: Arc<dyn RegistryStorePort>,
    tracker: Arc<dyn ArtifactTrackerPort>,
    vcs: Arc<dyn RevisionControlPort>,
}

impl PublishService {
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

    /// Push the content of `model`@`version`, then the revision history.
    pub fn publish(&self, model: &str, version: &str) -> Result<ArtifactRecord, CoreError> {
        let model = require_non_empty("model", model)?;
        let version = require_non_empty("version", version)?;
        let record = self.store.find(model, version)?;

        let failed = |source| CoreError::PublishFailed {
            model: record.model.clone(),
            version: record.version.clone(),
            source,
        };

        debug!(digest = %record.pointer_ref.short_digest(), "Pushing content");
        self.tracker
            .push(&record.pointer_ref)
            .map_err(|e| failed(PublishError::Content(e)))?;
        debug!("Pushing history");
        self.vcs
            .push()
            .map_err(|e| failed(PublishError::History(e)))?;

        info!(model = %record.model, version = %record.version, "Published version");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegistrationRequest;
    use crate::ports::TrackerError;
    use crate::services::RegistrationService;
    use crate::testing::{FsArtifactTracker, InMemoryRegistryStore, SnapshotRevisionControl};
    use std::fs;
    use tempfile::tempdir;

    fn setup() -> (
        tempfile::TempDir,
        Arc<InMemoryRegistryStore>,
        Arc<FsArtifactTracker>,
        Arc<SnapshotRevisionControl>,
    ) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x.csv"), "x\n").unwrap();
        let store = Arc::new(InMemoryRegistryStore::new());
        let tracker = Arc::new(FsArtifactTracker::new(dir.path()));
        let vcs = Arc::new(SnapshotRevisionControl::new(dir.path()));
        RegistrationService::new(
            store.clone(),
            tracker.clone(),
            vcs.clone(),
            dir.path().to_path_buf(),
        )
        .register(&RegistrationRequest::new("m", "v1", "x.csv", ""))
        .unwrap();
        (dir, store, tracker, vcs)
    }

    #[test]
    fn test_publish_pushes_content_then_history() {
        let (_dir, store, tracker, vcs) = setup();
        let service = PublishService::new(store, tracker.clone(), vcs.clone());

        let record = service.publish("m", "v1").unwrap();
        assert_eq!(
            tracker.calls().last().unwrap(),
            &format!("push {}", record.pointer_ref.short_digest())
        );
        assert_eq!(vcs.calls().last().unwrap(), "push");
    }

    #[test]
    fn test_content_failure_skips_history_push() {
        let (_dir, store, tracker, vcs) = setup();
        tracker.fail_push(true);
        let service = PublishService::new(store, tracker, vcs.clone());

        let err = service.publish("m", "v1").unwrap_err();
        assert!(matches!(
            err,
            CoreError::PublishFailed {
                source: PublishError::Content(_),
                ..
            }
        ));
        assert!(!vcs.calls().contains(&"push".to_string()));
    }

    #[test]
    fn test_history_failure() {
        let (_dir, store, tracker, vcs) = setup();
        vcs.fail_push(true);
        let service = PublishService::new(store, tracker, vcs);

        let err = service.publish("m", "v1").unwrap_err();
        assert!(matches!(
            err,
            CoreError::PublishFailed {
                source: PublishError::History(_),
                ..
            }
        ));
    }

    #[test]
    fn test_pointer_at_other_version_is_not_pushed() {
        let (dir, store, tracker, vcs) = setup();
        fs::write(dir.path().join("x.csv"), "y\n").unwrap();
        RegistrationService::new(
            store.clone(),
            tracker.clone(),
            vcs.clone(),
            dir.path().to_path_buf(),
        )
        .register(&RegistrationRequest::new("m", "v2", "x.csv", ""))
        .unwrap();
        let service = PublishService::new(store, tracker.clone(), vcs.clone());

        // The working tree now points at v2.
        let err = service.publish("m", "v1").unwrap_err();
        assert!(matches!(
            err,
            CoreError::PublishFailed {
                source: PublishError::Content(TrackerError::PointerMismatch { .. }),
                ..
            }
        ));
        assert!(!vcs.calls().contains(&"push".to_string()));

        service.publish("m", "v2").unwrap();
        assert_eq!(vcs.calls().last().unwrap(), "push");
    }

    #[test]
    fn test_unknown_version() {
        let (_dir, store, tracker, vcs) = setup();
        let service = PublishService::new(store, tracker, vcs);
        assert!(matches!(
            service.publish("m", "v2"),
            Err(CoreError::VersionNotFound { .. })
        ));
    }
}

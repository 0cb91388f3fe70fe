//! Registration orchestrator.
//!
//! Sequences validation, tracking, the pointer commit and the registry
//! append so that a registry entry only ever exists for a committed pointer.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{ArtifactRecord, RegistrationRequest, RevisionId};
use crate::error::{CommitStep, CoreError};
use crate::ports::{ArtifactTrackerPort, RegistryStorePort, RevisionControlPort};
use crate::utils::validation::{normalize_tracked_path, require_non_empty, validate_version};

/// What happened to the follow-up commit of the registry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCommit {
    /// The registry document was committed in this revision.
    Committed(RevisionId),
    /// No commit was attempted.
    Skipped(String),
    /// The commit was attempted and failed; the entry is still persisted.
    Failed(String),
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    /// The persisted record.
    pub record: ArtifactRecord,
    /// Status of the registry document commit.
    pub registry_commit: RegistryCommit,
}

/// Service registering new artifact versions.
pub struct RegistrationService {
    store: Arc<dyn RegistryStorePort>,
    tracker: Arc<dyn ArtifactTrackerPort>,
    vcs: Arc<dyn RevisionControlPort>,
    project_root: PathBuf,
    strict_versions: bool,
    commit_registry: bool,
}

impl RegistrationService {
    pub fn new(
        store: Arc<dyn RegistryStorePort>,
        tracker: Arc<dyn ArtifactTrackerPort>,
        vcs: Arc<dyn RevisionControlPort>,
        project_root: PathBuf,
    ) -> Self {
        Self {
            store,
            tracker,
            vcs,
            project_root,
            strict_versions: false,
            commit_registry: true,
        }
    }

    /// Require `vX.Y.Z` versions.
    #[must_use]
    pub const fn with_strict_versions(mut self, strict: bool) -> Self {
        self.strict_versions = strict;
        self
    }

    /// Commit the registry document after each registration.
    #[must_use]
    pub const fn with_registry_commit(mut self, enabled: bool) -> Self {
        self.commit_registry = enabled;
        self
    }

    /// Register a new version.
    ///
    /// Either the pointer commit and the registry entry both exist afterwards,
    /// or neither does. Nothing is tracked or committed before the duplicate
    /// check passes.
    pub fn register(&self, request: &RegistrationRequest) -> Result<RegistrationOutcome, CoreError> {
        let request = self.validate(request)?;

        let registry = self.store.load()?;
        if registry.find(&request.model, &request.version).is_some() {
            return Err(CoreError::DuplicateVersion {
                model: request.model,
                version: request.version,
            });
        }

        let path = PathBuf::from(&request.path);
        debug!(model = %request.model, version = %request.version, path = %path.display(), "Tracking artifact");
        let pointer = self
            .tracker
            .track(&path)
            .map_err(|source| CoreError::TrackingFailed {
                model: request.model.clone(),
                version: request.version.clone(),
                source,
            })?;

        let mut staged = vec![pointer.file.clone()];
        staged.extend(self.tracker.metadata_files(&path));
        debug!(files = ?staged, "Staging pointer file");
        self.vcs
            .stage(&staged)
            .map_err(|source| commit_failed(&request, CommitStep::Stage, source))?;

        let revision = self
            .vcs
            .commit(&request.commit_message(), &staged)
            .map_err(|source| commit_failed(&request, CommitStep::Commit, source))?;

        let record = ArtifactRecord::from_registration(&request, pointer, revision, Utc::now());
        self.store.append(record.clone()).inspect_err(|e| {
            warn!(
                revision = %record.revision_id.short(),
                error = %e,
                "Pointer committed but registry entry not written"
            );
        })?;
        info!(
            model = %record.model,
            version = %record.version,
            revision = %record.revision_id.short(),
            digest = %record.pointer_ref.short_digest(),
            "Registered version"
        );

        let registry_commit = self.commit_registry_document(&record);
        Ok(RegistrationOutcome {
            record,
            registry_commit,
        })
    }

    fn validate(&self, request: &RegistrationRequest) -> Result<RegistrationRequest, CoreError> {
        let model = require_non_empty("model", &request.model)?;
        validate_version(&request.version, self.strict_versions)?;
        let path = normalize_tracked_path(&self.project_root, &request.path)?;

        Ok(RegistrationRequest {
            model: model.to_string(),
            version: request.version.trim().to_string(),
            path: path.to_string_lossy().into_owned(),
            description: request.description.trim().to_string(),
            kind: request.kind,
        })
    }

    fn commit_registry_document(&self, record: &ArtifactRecord) -> RegistryCommit {
        if !self.commit_registry {
            return RegistryCommit::Skipped("registry commits are disabled".to_string());
        }
        let Ok(relative) = self.store.location().strip_prefix(&self.project_root) else {
            return RegistryCommit::Skipped("registry is outside the project".to_string());
        };

        let message = format!("registry: {} {}", record.model, record.version);
        let paths = [relative.to_path_buf()];
        let result = self
            .vcs
            .stage(&paths)
            .and_then(|()| self.vcs.commit(&message, &paths));
        match result {
            Ok(revision) => {
                debug!(revision = %revision.short(), "Committed registry document");
                RegistryCommit::Committed(revision)
            }
            Err(e) => {
                warn!(
                    registry = %relative.display(),
                    error = %e,
                    "Registry entry saved but the registry commit failed; commit it manually"
                );
                RegistryCommit::Failed(e.to_string())
            }
        }
    }
}

fn commit_failed(
    request: &RegistrationRequest,
    step: CommitStep,
    source: crate::ports::VcsError,
) -> CoreError {
    CoreError::CommitFailed {
        model: request.model.clone(),
        version: request.version.clone(),
        step,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtifactKind;
    use crate::ports::VcsError;
    use crate::testing::{FsArtifactTracker, InMemoryRegistryStore, SnapshotRevisionControl};
    use std::fs;
    use tempfile::{TempDir, tempdir};

    struct Fixture {
        dir: TempDir,
        store: Arc<InMemoryRegistryStore>,
        tracker: Arc<FsArtifactTracker>,
        vcs: Arc<SnapshotRevisionControl>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            fs::create_dir(dir.path().join("data")).unwrap();
            fs::write(dir.path().join("data/x.csv"), "a,b\n1,2\n").unwrap();
            Self {
                store: Arc::new(InMemoryRegistryStore::new()),
                tracker: Arc::new(FsArtifactTracker::new(dir.path())),
                vcs: Arc::new(SnapshotRevisionControl::new(dir.path())),
                dir,
            }
        }

        fn service(&self) -> RegistrationService {
            RegistrationService::new(
                self.store.clone(),
                self.tracker.clone(),
                self.vcs.clone(),
                self.dir.path().to_path_buf(),
            )
        }
    }

    fn request(version: &str) -> RegistrationRequest {
        RegistrationRequest::new("modelA", version, "data/x.csv", "initial")
    }

    #[test]
    fn test_register_commits_pointer_then_appends() {
        let fx = Fixture::new();
        let outcome = fx.service().register(&request("v1.0.0")).unwrap();

        let record = &outcome.record;
        assert_eq!(record.path, PathBuf::from("data/x.csv"));
        assert_eq!(record.pointer_ref.file, PathBuf::from("data/x.csv.ptr"));
        assert_eq!(record.revision_id.as_str(), "rev0001");
        assert_eq!(fx.vcs.messages(), vec!["[modelA] v1.0.0: initial"]);
        assert_eq!(
            fx.vcs.tree_paths(&record.revision_id),
            vec![PathBuf::from("data/.gitignore"), PathBuf::from("data/x.csv.ptr")]
        );
        assert_eq!(fx.store.snapshot().find("modelA", "v1.0.0"), Some(record));
        assert!(matches!(outcome.registry_commit, RegistryCommit::Skipped(_)));
    }

    #[test]
    fn test_unrelated_staged_files_stay_out_of_the_commit() {
        let fx = Fixture::new();
        fs::write(fx.dir.path().join("notes.txt"), "draft\n").unwrap();
        fx.vcs.stage(&[PathBuf::from("notes.txt")]).unwrap();

        let outcome = fx.service().register(&request("v1.0.0")).unwrap();
        assert!(
            !fx.vcs
                .tree_paths(&outcome.record.revision_id)
                .contains(&PathBuf::from("notes.txt"))
        );

        let later = fx
            .vcs
            .commit("notes", &[PathBuf::from("notes.txt")])
            .unwrap();
        assert!(fx.vcs.tree_paths(&later).contains(&PathBuf::from("notes.txt")));
    }

    #[test]
    fn test_duplicate_has_no_side_effects() {
        let fx = Fixture::new();
        fx.service().register(&request("v1.0.0")).unwrap();
        let tracker_calls = fx.tracker.calls().len();
        let vcs_calls = fx.vcs.calls().len();

        let err = fx.service().register(&request("v1.0.0")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateVersion { .. }));
        assert_eq!(fx.tracker.calls().len(), tracker_calls);
        assert_eq!(fx.vcs.calls().len(), vcs_calls);
        assert_eq!(fx.store.snapshot().len(), 1);
    }

    #[test]
    fn test_invalid_input_is_rejected_before_tracking() {
        let fx = Fixture::new();
        let service = fx.service();

        for bad in [
            RegistrationRequest::new("", "v1.0.0", "data/x.csv", ""),
            RegistrationRequest::new("modelA", " ", "data/x.csv", ""),
            RegistrationRequest::new("modelA", "v1.0.0", "", ""),
            RegistrationRequest::new("modelA", "v1.0.0", "data/missing.csv", ""),
            RegistrationRequest::new("modelA", "v1.0.0", "../outside", ""),
        ] {
            let err = service.register(&bad).unwrap_err();
            assert!(matches!(err, CoreError::InvalidInput(_)), "{bad:?}");
        }
        assert!(fx.tracker.calls().is_empty());
    }

    #[test]
    fn test_strict_versions_rejects_free_form() {
        let fx = Fixture::new();
        let service = fx.service().with_strict_versions(true);

        let err = service.register(&request("release-1")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(service.register(&request("v1.0.0")).is_ok());
    }

    #[test]
    fn test_tracking_failure_skips_commit() {
        let fx = Fixture::new();
        fx.tracker.fail_track(true);

        let err = fx.service().register(&request("v1.0.0")).unwrap_err();
        assert!(matches!(err, CoreError::TrackingFailed { .. }));
        assert!(fx.vcs.calls().is_empty());
        assert!(fx.store.snapshot().is_empty());
    }

    #[test]
    fn test_commit_failure_leaves_registry_unchanged() {
        let fx = Fixture::new();
        fx.vcs.fail_commit(true);

        let err = fx.service().register(&request("v1.0.0")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CommitFailed {
                step: CommitStep::Commit,
                ..
            }
        ));
        assert!(fx.store.snapshot().is_empty());
        assert!(fx.dir.path().join("data/x.csv.ptr").exists());
    }

    #[test]
    fn test_append_failure_after_commit_is_storage() {
        let fx = Fixture::new();
        fx.store.fail_appends(true);

        let err = fx.service().register(&request("v1.0.0")).unwrap_err();
        assert!(matches!(err, CoreError::Storage { .. }));
        assert_eq!(fx.vcs.messages(), vec!["[modelA] v1.0.0: initial"]);
        assert!(fx.store.snapshot().is_empty());
        assert!(fx.dir.path().join("data/x.csv.ptr").exists());

        // Storage recovered; the committed content has nothing left to commit.
        fx.store.fail_appends(false);
        let err = fx.service().register(&request("v1.0.0")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CommitFailed {
                source: VcsError::NothingToCommit,
                ..
            }
        ));
        assert!(fx.store.snapshot().is_empty());
    }

    #[test]
    fn test_stage_failure_is_commit_failed() {
        let fx = Fixture::new();
        fx.vcs.fail_stage(true);

        let err = fx.service().register(&request("v1.0.0")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CommitFailed {
                step: CommitStep::Stage,
                ..
            }
        ));
    }

    #[test]
    fn test_unchanged_content_is_nothing_to_commit() {
        let fx = Fixture::new();
        fx.service().register(&request("v1.0.0")).unwrap();

        let err = fx.service().register(&request("v1.0.1")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::CommitFailed {
                source: VcsError::NothingToCommit,
                ..
            }
        ));
        assert_eq!(fx.store.snapshot().len(), 1);
    }

    #[test]
    fn test_registry_document_is_committed_when_inside_project() {
        let fx = Fixture::new();
        let location = fx.dir.path().join("model_registry.json");
        fs::write(&location, "{}\n").unwrap();
        let store = Arc::new(InMemoryRegistryStore::with_location(location));
        let service = RegistrationService::new(
            store,
            fx.tracker.clone(),
            fx.vcs.clone(),
            fx.dir.path().to_path_buf(),
        );

        let outcome = service
            .register(&request("v1.0.0").with_kind(ArtifactKind::Model))
            .unwrap();
        assert_eq!(
            outcome.registry_commit,
            RegistryCommit::Committed(RevisionId::new("rev0002"))
        );
        assert_eq!(outcome.record.revision_id.as_str(), "rev0001");
        assert_eq!(outcome.record.kind, ArtifactKind::Model);
        assert_eq!(fx.vcs.messages()[1], "registry: modelA v1.0.0");
    }

    #[test]
    fn test_registry_commit_failure_is_not_fatal() {
        let fx = Fixture::new();
        // Location inside the project that does not exist, so staging fails.
        let store = Arc::new(InMemoryRegistryStore::with_location(
            fx.dir.path().join("model_registry.json"),
        ));
        let service = RegistrationService::new(
            store.clone(),
            fx.tracker.clone(),
            fx.vcs.clone(),
            fx.dir.path().to_path_buf(),
        );

        let outcome = service.register(&request("v1.0.0")).unwrap();
        assert!(matches!(outcome.registry_commit, RegistryCommit::Failed(_)));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_registry_commit_can_be_disabled() {
        let fx = Fixture::new();
        let outcome = fx
            .service()
            .with_registry_commit(false)
            .register(&request("v1.0.0"))
            .unwrap();
        assert_eq!(
            outcome.registry_commit,
            RegistryCommit::Skipped("registry commits are disabled".to_string())
        );
    }
}

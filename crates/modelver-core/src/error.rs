//! Core error taxonomy.
//!
//! Every orchestrator operation fails with exactly one `CoreError` variant.
//! Adapter failures are wrapped with the model, version and step they
//! interrupted. Adapters (the CLI) map `ErrorKind` to exit codes.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::RevisionId;
use crate::ports::{TrackerError, VcsError};

/// The step of the pointer commit that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStep {
    Stage,
    Commit,
}

impl fmt::Display for CommitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stage => f.write_str("stage"),
            Self::Commit => f.write_str("commit"),
        }
    }
}

/// Failure while pushing a version to its remotes.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Uploading artifact content failed.
    #[error("content push failed: {0}")]
    Content(#[source] TrackerError),

    /// Pushing revision history failed.
    #[error("history push failed: {0}")]
    History(#[source] VcsError),
}

/// Core error type for orchestrator operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bad or missing arguments, or a local precondition does not hold.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The (model, version) pair is already registered.
    #[error("Version {version} of '{model}' is already registered")]
    DuplicateVersion { model: String, version: String },

    /// Lookup miss.
    #[error("Version {version} for '{model}' not found in registry")]
    VersionNotFound { model: String, version: String },

    /// The persisted registry document cannot be used.
    #[error("Registry {path} is corrupt: {reason}")]
    RegistryCorrupt { path: PathBuf, reason: String },

    /// Reading or writing the registry document failed.
    #[error("Registry storage error at {path}: {reason}")]
    Storage { path: PathBuf, reason: String },

    /// The artifact tracker could not track the path.
    #[error("Tracking failed for '{model}' {version}: {source}")]
    TrackingFailed {
        model: String,
        version: String,
        #[source]
        source: TrackerError,
    },

    /// Staging or committing the pointer file failed.
    #[error("Commit failed for '{model}' {version} during {step}: {source}")]
    CommitFailed {
        model: String,
        version: String,
        step: CommitStep,
        #[source]
        source: VcsError,
    },

    /// Restoring the pointer file from history failed.
    #[error("Checkout of {revision} failed for '{model}' {version}: {source}")]
    CheckoutFailed {
        model: String,
        version: String,
        revision: RevisionId,
        #[source]
        source: VcsError,
    },

    /// Fetching artifact content from remote storage failed.
    #[error("Materialize failed for '{model}' {version}: {source}")]
    MaterializeFailed {
        model: String,
        version: String,
        #[source]
        source: TrackerError,
    },

    /// Pushing a registered version to its remotes failed.
    #[error("Publish failed for '{model}' {version}: {source}")]
    PublishFailed {
        model: String,
        version: String,
        #[source]
        source: PublishError,
    },
}

/// Discriminant of `CoreError`, for exit codes and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    DuplicateVersion,
    VersionNotFound,
    RegistryCorrupt,
    Storage,
    TrackingFailed,
    CommitFailed,
    CheckoutFailed,
    MaterializeFailed,
    PublishFailed,
}

impl ErrorKind {
    /// Stable name used in user-facing messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInputError",
            Self::DuplicateVersion => "DuplicateVersionError",
            Self::VersionNotFound => "VersionNotFoundError",
            Self::RegistryCorrupt => "RegistryCorruptError",
            Self::Storage => "StorageError",
            Self::TrackingFailed => "TrackingFailedError",
            Self::CommitFailed => "CommitFailedError",
            Self::CheckoutFailed => "CheckoutFailedError",
            Self::MaterializeFailed => "MaterializeFailedError",
            Self::PublishFailed => "PublishFailedError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CoreError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::DuplicateVersion { .. } => ErrorKind::DuplicateVersion,
            Self::VersionNotFound { .. } => ErrorKind::VersionNotFound,
            Self::RegistryCorrupt { .. } => ErrorKind::RegistryCorrupt,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::TrackingFailed { .. } => ErrorKind::TrackingFailed,
            Self::CommitFailed { .. } => ErrorKind::CommitFailed,
            Self::CheckoutFailed { .. } => ErrorKind::CheckoutFailed,
            Self::MaterializeFailed { .. } => ErrorKind::MaterializeFailed,
            Self::PublishFailed { .. } => ErrorKind::PublishFailed,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn not_found(model: &str, version: &str) -> Self {
        Self::VersionNotFound {
            model: model.to_string(),
            version: version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_follow_taxonomy() {
        let err = CoreError::not_found("modelA", "v2.0.0");
        assert_eq!(err.kind(), ErrorKind::VersionNotFound);
        assert_eq!(err.kind().as_str(), "VersionNotFoundError");
        assert_eq!(
            err.to_string(),
            "Version v2.0.0 for 'modelA' not found in registry"
        );
    }

    #[test]
    fn test_wrapped_errors_keep_context_and_source() {
        let err = CoreError::CommitFailed {
            model: "modelA".into(),
            version: "v1.0.0".into(),
            step: CommitStep::Commit,
            source: VcsError::NothingToCommit,
        };
        let msg = err.to_string();
        assert!(msg.contains("modelA"));
        assert!(msg.contains("v1.0.0"));
        assert!(msg.contains("commit"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

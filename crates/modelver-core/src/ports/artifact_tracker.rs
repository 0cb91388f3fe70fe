//! Artifact tracker port definition.
//!
//! This port abstracts the content-addressed tracking tool (dvc, or a fake in
//! tests). The orchestrators never hash content or move bytes over the
//! network themselves; they only sequence calls to this trait.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::PointerRef;

/// Errors reported by an artifact tracker implementation.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker executable could not be found.
    #[error("tracker not installed: {0}")]
    NotInstalled(String),

    /// The project has not been initialised for the tracker.
    #[error("tracker not initialized: {0}")]
    NotInitialized(String),

    /// The path (or pointer file) does not exist in the working tree.
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// The content is neither in the local cache nor on the remote.
    #[error("object missing from remote storage: {0}")]
    MissingRemoteObject(String),

    /// The pointer file exists but cannot be understood.
    #[error("malformed pointer file {}: {reason}", .file.display())]
    MalformedPointer { file: PathBuf, reason: String },

    /// After fetching, the pointer in the working tree is not the one requested.
    #[error("pointer {} has digest {actual}, expected {expected}", .file.display())]
    PointerMismatch {
        file: PathBuf,
        expected: String,
        actual: String,
    },

    /// The tracker command exited unsuccessfully for another reason.
    #[error("`{command}` failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Local I/O failure.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for the content-addressed artifact tracker.
///
/// All paths are relative to the project root.
pub trait ArtifactTrackerPort: Send + Sync {
    /// Track `path` and return the pointer describing its current content.
    ///
    /// Re-tracking unchanged content is a no-op that returns the same pointer.
    fn track(&self, path: &Path) -> Result<PointerRef, TrackerError>;

    /// Tracker-owned files that must be committed next to the pointer file
    /// (ignore files and the like). Only existing files are returned.
    fn metadata_files(&self, path: &Path) -> Vec<PathBuf>;

    /// Read the pointer currently present in the working tree.
    ///
    /// Returns `PathNotFound` when the pointer file does not exist.
    fn current(&self, pointer_file: &Path) -> Result<PointerRef, TrackerError>;

    /// Fetch the content described by `pointer` into the working tree.
    ///
    /// Fails with `PointerMismatch` when the working-tree pointer file holds
    /// another digest. `target` narrows the fetch to one file inside a
    /// tracked directory.
    fn materialize(&self, pointer: &PointerRef, target: Option<&Path>)
    -> Result<(), TrackerError>;

    /// Upload the content described by `pointer` to remote storage.
    ///
    /// Fails with `PointerMismatch` when the working-tree pointer file holds
    /// another digest.
    fn push(&self, pointer: &PointerRef) -> Result<(), TrackerError>;
}

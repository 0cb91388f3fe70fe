//! Revision control port definition.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::RevisionId;

/// Errors reported by a revision-control implementation.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The revision-control executable could not be found.
    #[error("revision control not installed: {0}")]
    NotInstalled(String),

    /// The project directory is not a repository.
    #[error("not a repository: {0}")]
    NotARepository(String),

    /// Nothing is staged, so no commit can be created.
    #[error("nothing to commit")]
    NothingToCommit,

    /// The revision (or a path inside it) does not exist.
    #[error("unknown revision: {0}")]
    UnknownRevision(String),

    /// The command exited unsuccessfully for another reason.
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

/// Port for the revision-control system.
///
/// Each call is assumed atomic. All paths are relative to the project root.
pub trait RevisionControlPort: Send + Sync {
    /// Stage `paths` for the next commit.
    fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError>;

    /// Commit the staged content of `paths` and return the new revision.
    ///
    /// Anything else already staged stays staged and out of the commit.
    /// Fails with `NothingToCommit` when none of `paths` has staged changes.
    fn commit(&self, message: &str, paths: &[PathBuf]) -> Result<RevisionId, VcsError>;

    /// Restore `paths` in the working tree to their content at `revision`.
    fn checkout(&self, revision: &RevisionId, paths: &[PathBuf]) -> Result<(), VcsError>;

    /// Push local history to the configured remote.
    fn push(&self) -> Result<(), VcsError>;
}

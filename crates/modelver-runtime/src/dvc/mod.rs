//! `ArtifactTrackerPort` implementation backed by the `dvc` executable.
//!
//! Commands used:
//! - `dvc add <path>` writes `<path>.dvc` and updates the parent `.gitignore`
//! - `dvc pull <pointer or file>` fetches content into the working tree
//! - `dvc push <pointer>` uploads content to the default remote

mod classify;
pub mod pointer_file;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use modelver_core::{ArtifactTrackerPort, PointerRef, TrackerError};
use tracing::debug;

use crate::command::ToolCommand;
pub use classify::classify;
use classify::spawn_error;

/// dvc adapter rooted at the project directory.
pub struct DvcArtifactTracker {
    root: PathBuf,
    dvc: ToolCommand,
}

impl DvcArtifactTracker {
    pub fn new(project_root: &Path, program: &str) -> Self {
        Self {
            root: project_root.to_path_buf(),
            dvc: ToolCommand::new(program, project_root),
        }
    }

    fn run_checked(&self, args: &[&OsStr]) -> Result<(), TrackerError> {
        let output = self.dvc.run(args).map_err(spawn_error)?;
        if output.success() {
            Ok(())
        } else {
            Err(classify(&output))
        }
    }

    /// dvc acts on whatever the working-tree pointer says, so it must be the
    /// one the caller asked for.
    fn ensure_current(&self, pointer: &PointerRef) -> Result<(), TrackerError> {
        let current = self.current(&pointer.file)?;
        if current.digest == pointer.digest {
            return Ok(());
        }
        Err(TrackerError::PointerMismatch {
            file: pointer.file.clone(),
            expected: pointer.digest.clone(),
            actual: current.digest,
        })
    }

    fn ignore_file_for(path: &Path) -> PathBuf {
        path.parent()
            .map_or_else(|| PathBuf::from(".gitignore"), |p| p.join(".gitignore"))
    }
}

impl ArtifactTrackerPort for DvcArtifactTracker {
    fn track(&self, path: &Path) -> Result<PointerRef, TrackerError> {
        if !self.root.join(path).exists() {
            return Err(TrackerError::PathNotFound(path.to_path_buf()));
        }
        self.run_checked(&[OsStr::new("add"), path.as_os_str()])?;

        let pointer = pointer_file::read(&self.root, &pointer_file::pointer_file_for(path))?;
        debug!(pointer = %pointer.file.display(), digest = %pointer.short_digest(), "Tracked");
        Ok(pointer)
    }

    fn metadata_files(&self, path: &Path) -> Vec<PathBuf> {
        let ignore = Self::ignore_file_for(path);
        if self.root.join(&ignore).is_file() {
            vec![ignore]
        } else {
            Vec::new()
        }
    }

    fn current(&self, pointer_file: &Path) -> Result<PointerRef, TrackerError> {
        pointer_file::read(&self.root, pointer_file)
    }

    fn materialize(
        &self,
        pointer: &PointerRef,
        target: Option<&Path>,
    ) -> Result<(), TrackerError> {
        self.ensure_current(pointer)?;
        let target = target.unwrap_or(&pointer.file);
        self.run_checked(&[OsStr::new("pull"), target.as_os_str()])
    }

    fn push(&self, pointer: &PointerRef) -> Result<(), TrackerError> {
        self.ensure_current(pointer)?;
        self.run_checked(&[OsStr::new("push"), pointer.file.as_os_str()])
    }
}

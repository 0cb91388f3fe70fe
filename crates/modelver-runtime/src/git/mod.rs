//! `RevisionControlPort` implementation backed by the `git` executable.
//!
//! Commands used:
//! - `git add -- <paths>`
//! - `git diff --cached --quiet -- <paths>` (exit 1 means something is staged)
//! - `git commit --only -m <message> -- <paths>`
//! - `git rev-parse HEAD`
//! - `git checkout <rev> -- <paths>`
//! - `git push`
//!
//! Commits name their paths, so unrelated changes the user has staged are
//! left in the index.

mod classify;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use modelver_core::{RevisionControlPort, RevisionId, VcsError};
use tracing::debug;

use crate::command::ToolCommand;
pub use classify::classify;
use classify::spawn_error;

/// Git adapter rooted at the project directory.
pub struct GitRevisionControl {
    git: ToolCommand,
}

impl GitRevisionControl {
    pub fn new(project_root: &Path, program: &str) -> Self {
        Self {
            git: ToolCommand::new(program, project_root),
        }
    }

    fn run_checked<I, S>(&self, args: I) -> Result<String, VcsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let output = self.git.run(args).map_err(spawn_error)?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(classify(&output))
        }
    }

    fn has_staged_changes(&self, paths: &[PathBuf]) -> Result<bool, VcsError> {
        let output = self
            .git
            .run(with_paths(&["diff", "--cached", "--quiet", "--"], paths))
            .map_err(spawn_error)?;
        match output.code {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(classify(&output)),
        }
    }
}

fn with_paths(prefix: &[&str], paths: &[PathBuf]) -> Vec<OsString> {
    prefix
        .iter()
        .map(OsString::from)
        .chain(paths.iter().map(|p| p.clone().into_os_string()))
        .collect()
}

impl RevisionControlPort for GitRevisionControl {
    fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError> {
        if paths.is_empty() {
            return Ok(());
        }
        self.run_checked(with_paths(&["add", "--"], paths))?;
        Ok(())
    }

    fn commit(&self, message: &str, paths: &[PathBuf]) -> Result<RevisionId, VcsError> {
        if paths.is_empty() || !self.has_staged_changes(paths)? {
            return Err(VcsError::NothingToCommit);
        }
        let mut args = vec![
            OsString::from("commit"),
            OsString::from("--only"),
            OsString::from("-m"),
            OsString::from(message),
        ];
        args.extend(with_paths(&["--"], paths));
        self.run_checked(args)?;
        let head = self.run_checked(["rev-parse", "HEAD"])?;
        let revision = RevisionId::new(head.trim());
        debug!(revision = %revision.short(), "Created commit");
        Ok(revision)
    }

    fn checkout(&self, revision: &RevisionId, paths: &[PathBuf]) -> Result<(), VcsError> {
        let mut args = vec![OsString::from("checkout"), OsString::from(revision.as_str())];
        args.extend(with_paths(&["--"], paths));
        self.run_checked(args)?;
        Ok(())
    }

    fn push(&self) -> Result<(), VcsError> {
        self.run_checked(["push"])?;
        Ok(())
    }
}

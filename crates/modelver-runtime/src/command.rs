//! Blocking subprocess execution for the external tools.
//!
//! Every adapter call goes through `ToolCommand::run`, which waits for the
//! child to exit and captures its output. There is no timeout.

use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// Failure to run a tool at all (as opposed to the tool reporting an error).
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The executable is not on PATH.
    #[error("`{0}` is not installed or not on PATH")]
    NotFound(String),

    /// Any other spawn failure.
    #[error("failed to run `{program}`: {reason}")]
    Io { program: String, reason: String },
}

/// Captured result of a finished tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// The command line, for error messages.
    pub command: String,
    /// Exit code; `None` when terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Stderr, or stdout when stderr is empty (some tools report on stdout).
    pub fn diagnostics(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// An external program bound to a working directory.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    cwd: PathBuf,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            cwd: cwd.into(),
        }
    }

    /// Run the program with `args` and wait for it to exit.
    pub fn run<I, S>(&self, args: I) -> Result<ToolOutput, SpawnError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let command = self.describe(&args);
        debug!(cwd = %self.cwd.display(), "Running {command}");

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.cwd)
            .output()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    SpawnError::NotFound(self.program.clone())
                } else {
                    SpawnError::Io {
                        program: self.program.clone(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let result = ToolOutput {
            command,
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(code = ?result.code, "{} finished", self.program);
        Ok(result)
    }

    fn describe<S: AsRef<OsStr>>(&self, args: &[S]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

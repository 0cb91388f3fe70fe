//! External tool detection for `check-deps`.

use std::path::PathBuf;

use crate::command::ToolCommand;

/// Availability of one external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    /// Display name (`git`, `dvc`).
    pub name: &'static str,
    /// Program that was looked up (may be overridden in settings).
    pub program: String,
    /// Resolved executable, when found on PATH.
    pub path: Option<PathBuf>,
    /// First line of `--version` output.
    pub version: Option<String>,
}

impl ToolStatus {
    pub const fn is_present(&self) -> bool {
        self.path.is_some()
    }
}

/// Look up `program` on PATH and ask it for its version.
pub fn probe_tool(name: &'static str, program: &str) -> ToolStatus {
    let path = which::which(program).ok();
    let version = path.as_ref().and_then(|_| {
        let output = ToolCommand::new(program, ".").run(["--version"]).ok()?;
        if !output.success() {
            return None;
        }
        output
            .diagnostics()
            .lines()
            .next()
            .map(|line| line.trim().to_string())
    });
    ToolStatus {
        name,
        program: program.to_string(),
        path,
        version,
    }
}

/// Probe git and dvc.
pub fn probe_tools(git_program: &str, dvc_program: &str) -> Vec<ToolStatus> {
    vec![probe_tool("git", git_program), probe_tool("dvc", dvc_program)]
}

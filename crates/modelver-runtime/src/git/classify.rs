//! Map git failures onto `VcsError`.

use modelver_core::VcsError;

use crate::command::{SpawnError, ToolOutput};

/// Classify a failed git invocation by its output.
pub fn classify(output: &ToolOutput) -> VcsError {
    let text = output.diagnostics();
    let lower = text.to_ascii_lowercase();

    if lower.contains("not a git repository") {
        VcsError::NotARepository(text.to_string())
    } else if lower.contains("nothing to commit") || lower.contains("no changes added to commit") {
        VcsError::NothingToCommit
    } else if lower.contains("did not match any file(s) known to git")
        || lower.contains("unknown revision")
        || lower.contains("invalid reference")
        || lower.contains("bad revision")
        || lower.contains("not a valid object name")
        || lower.contains("reference is not a tree")
    {
        VcsError::UnknownRevision(text.to_string())
    } else {
        VcsError::CommandFailed {
            command: output.command.clone(),
            code: output.code,
            stderr: text.to_string(),
        }
    }
}

/// Map a spawn failure.
pub fn spawn_error(err: SpawnError) -> VcsError {
    match err {
        SpawnError::NotFound(program) => VcsError::NotInstalled(program),
        SpawnError::Io { reason, .. } => VcsError::Io(reason),
    }
}

//! Map dvc failures onto `TrackerError`.

use modelver_core::TrackerError;

use crate::command::{SpawnError, ToolOutput};

/// Classify a failed dvc invocation by its output.
pub fn classify(output: &ToolOutput) -> TrackerError {
    let text = output.diagnostics();
    let lower = text.to_ascii_lowercase();

    if lower.contains("not inside of a dvc repository")
        || lower.contains("you are not inside of a dvc repository")
    {
        TrackerError::NotInitialized(text.to_string())
    } else if lower.contains("missing cache files")
        || lower.contains("some of the cache files do not exist")
        || lower.contains("failed to fetch")
        || lower.contains("failed to pull")
        || lower.contains("no remote provided")
        || lower.contains("is missing from")
    {
        TrackerError::MissingRemoteObject(text.to_string())
    } else if lower.contains("does not exist") && lower.contains("path") {
        TrackerError::PathNotFound(text.into())
    } else {
        TrackerError::CommandFailed {
            command: output.command.clone(),
            code: output.code,
            stderr: text.to_string(),
        }
    }
}

/// Map a spawn failure.
pub fn spawn_error(err: SpawnError) -> TrackerError {
    match err {
        SpawnError::NotFound(program) => TrackerError::NotInstalled(program),
        SpawnError::Io { reason, .. } => TrackerError::Io(reason),
    }
}

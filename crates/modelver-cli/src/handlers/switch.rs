//! Switch command handler.

use anyhow::Result;
use modelver_core::{SwitchRequest, SwitchState, WorkingTreeState};

use crate::bootstrap::CliContext;

/// Execute the switch command.
///
/// Restores the pointer file of `version` and, with `pull`, fetches its
/// content. The registry is never modified.
pub fn execute(ctx: &CliContext, model: &str, version: &str, pull: bool, force: bool) -> Result<()> {
    let request = SwitchRequest::new(model, version)
        .with_pull(pull)
        .with_force(force);
    let outcome = ctx.app().switching().switch(&request)?;
    let record = &outcome.record;

    println!(
        "Updated {} to version {} with digest {}.",
        record.pointer_ref.file.display(),
        record.version,
        record.pointer_ref.digest
    );
    if let Some(note) = previous_note(&outcome.previous) {
        println!("{note}");
    }
    match outcome.state {
        SwitchState::Materialized => {
            println!("Pulled data for {} version {}.", record.model, record.version);
        }
        SwitchState::PointerRestored => {
            println!(
                "Content of {} not fetched; run with --pull or `modelver pull-model {}`.",
                record.path.display(),
                record.model
            );
        }
    }
    Ok(())
}

fn previous_note(previous: &WorkingTreeState) -> Option<String> {
    match previous {
        WorkingTreeState::Registered { version } => Some(format!("Previously at {version}.")),
        WorkingTreeState::Matches => Some("Already at this version.".to_string()),
        WorkingTreeState::Unregistered { digest } => Some(format!(
            "Discarded unregistered pointer with digest {digest}."
        )),
        WorkingTreeState::Unreadable { reason } => {
            Some(format!("Replaced unreadable pointer ({reason})."))
        }
        WorkingTreeState::Missing => None,
    }
}

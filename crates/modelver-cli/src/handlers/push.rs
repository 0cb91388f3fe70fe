//! Push command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Push the content and history of a registered version to the remotes.
pub fn execute(ctx: &CliContext, model: &str, version: &str) -> Result<()> {
    let record = ctx.app().publishing().publish(model, version)?;
    println!(
        "Pushed '{}' {} (revision {}).",
        record.model,
        record.version,
        record.revision_id.short()
    );
    Ok(())
}

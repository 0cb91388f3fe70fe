//! Pull command handlers (`pull-file`, `pull-model`).
//!
//! Both fetch whatever the working-tree pointer currently describes.

use anyhow::Result;
use modelver_core::PullOutcome;

use crate::bootstrap::CliContext;
use crate::presentation::format_optional;

/// Fetch one file inside the tracked directory of `model`.
pub fn execute_file(ctx: &CliContext, file_path: &str, model: &str) -> Result<()> {
    let outcome = ctx.app().pulls().pull_file(model, file_path)?;
    print_outcome(&outcome);
    Ok(())
}

/// Fetch the whole tracked path of `model`.
pub fn execute_model(ctx: &CliContext, model: &str) -> Result<()> {
    let outcome = ctx.app().pulls().pull_model(model)?;
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &PullOutcome) {
    println!(
        "Pulled {} successfully (version {}, digest {}).",
        outcome.path.display(),
        format_optional(outcome.version.as_ref(), "unregistered"),
        outcome.pointer.short_digest()
    );
}

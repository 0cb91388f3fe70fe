//! Paths command handler.
//!
//! Displays the resolved project directory and registry document in
//! `key = value` format, for diagnosing which project a command runs against.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Execute the paths command.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("{}", ctx.paths());
    Ok(())
}

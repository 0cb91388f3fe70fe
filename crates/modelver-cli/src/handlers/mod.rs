#![doc = include_str!("README.md")]

//! Command handlers that delegate to `AppCore`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - No business logic, no direct adapter access

pub mod add;
pub mod check_deps;
pub mod list;
pub mod paths;
pub mod pull;
pub mod push;
pub mod switch;

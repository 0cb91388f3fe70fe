//! Check system dependencies handler.
//!
//! Looks up git and dvc (or the programs configured in their place) and
//! prints one status row per tool.

use anyhow::Result;
use modelver_runtime::{ToolStatus, probe_tools};

use crate::bootstrap::CliContext;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Execute the check-deps command.
///
/// Fails (exit code 1) when any tool is missing.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("{BOLD}{BLUE}Checking system dependencies...{RESET}\n");

    let settings = ctx.settings();
    let tools = probe_tools(
        settings.effective_git_program(),
        settings.effective_dvc_program(),
    );

    println!("{BOLD}{:<12} {:<30} {}{RESET}", "DEPENDENCY", "STATUS", "LOCATION");
    println!("{}", "=".repeat(85));
    for tool in &tools {
        println!("{}", tool_row(tool));
    }
    println!("{}", "=".repeat(85));

    let missing: Vec<&ToolStatus> = tools.iter().filter(|t| !t.is_present()).collect();
    if missing.is_empty() {
        println!(
            "{GREEN}✓ All required dependencies are installed!{RESET} ({}/{})",
            tools.len(),
            tools.len()
        );
        return Ok(());
    }

    println!(
        "{RED}✗ {} required dependencies are missing.{RESET} ({}/{})",
        missing.len(),
        tools.len() - missing.len(),
        tools.len()
    );
    for tool in missing {
        println!("  {} ('{}' not found on PATH): {}", tool.name, tool.program, install_hint(tool.name));
    }
    anyhow::bail!("Missing required dependencies")
}

fn tool_row(tool: &ToolStatus) -> String {
    let status = match (&tool.path, &tool.version) {
        (Some(_), Some(version)) => format!("{GREEN}✓ {version}{RESET}"),
        (Some(_), None) => format!("{GREEN}✓ installed{RESET}"),
        (None, _) => format!("{RED}✗ missing{RESET}"),
    };
    let location = tool
        .path
        .as_ref()
        .map_or_else(|| "--".to_string(), |p| p.display().to_string());
    // Pad the visible text; the color codes add nine invisible bytes.
    format!("{:<12} {:<39} {location}", tool.name, status)
}

fn install_hint(name: &str) -> &'static str {
    match name {
        "git" => "install it from https://git-scm.com/downloads",
        "dvc" => "install it with `pip install dvc` or see https://dvc.org/doc/install",
        _ => "install it and make sure it is on PATH",
    }
}

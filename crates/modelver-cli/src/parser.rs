//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the model version registry.
///
/// Handles global options and dispatches to subcommands.
#[derive(Parser, Debug)]
#[command(name = "modelver")]
#[command(about = "Register, switch and fetch versions of data and models tracked with dvc and git")]
#[command(version)]
pub struct Cli {
    /// Run against this project directory instead of discovering one
    #[arg(short = 'C', long = "project-dir", global = true)]
    pub project_dir: Option<PathBuf>,

    /// Registry document, relative to the project directory or absolute
    #[arg(long = "registry", global = true)]
    pub registry: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "modelver",
            "--verbose",
            "-C",
            "/tmp/project",
            "--registry",
            "registry.json",
            "list",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp/project")));
        assert_eq!(cli.registry.as_deref(), Some("registry.json"));
        assert!(matches!(cli.command, Some(Commands::List { model: None })));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["modelver", "paths", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Paths)));
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::parse_from(["modelver"]);
        assert!(cli.command.is_none());
    }
}

//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use clap::{Args, Subcommand};

/// Available commands.
///
/// Every command runs against one project directory and reloads the
/// registry document from disk.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Track a file or folder and register it as a new version of a model
    AddData(AddArgs),

    /// Track a model directory and register it as a new version of a model
    AddModel(AddArgs),

    /// Restore the pointer of a registered version into the working tree
    Switch {
        /// Name of the model
        model: String,
        /// Registered version to switch to
        version: String,
        /// Also fetch the content after switching
        #[arg(long)]
        pull: bool,
        /// Overwrite a local pointer that matches no registered version
        #[arg(long)]
        force: bool,
    },

    /// Fetch one file inside a model's tracked directory
    PullFile {
        /// File to fetch, relative to the model directory
        file_path: String,
        /// Model the file belongs to
        model: String,
    },

    /// Fetch the whole tracked path of a model
    PullModel {
        /// Model to fetch
        model: String,
    },

    /// List registered versions
    List {
        /// Only show versions of this model
        model: Option<String>,
    },

    /// Push a registered version's content and history to their remotes
    Push {
        /// Name of the model
        model: String,
        /// Registered version to push
        version: String,
    },

    /// Show resolved project and registry paths
    Paths,

    /// Check that git and dvc are installed
    CheckDeps,
}

/// Arguments shared by `add-data` and `add-model`.
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Path to the file or folder, relative to the project directory
    pub path: String,
    /// Version identifier (e.g. v1.0.0)
    pub version: String,
    /// Model name the version belongs to
    pub model: String,
    /// Description of the change
    #[arg(default_value = "")]
    pub description: String,
    /// Push content and history to the remotes after registering
    #[arg(long)]
    pub push: bool,
    /// Do not ask for confirmation when adding an older version
    #[arg(short, long)]
    pub yes: bool,
}

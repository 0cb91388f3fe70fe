#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod command;
pub mod detect;
pub mod dvc;
pub mod git;

pub use command::{SpawnError, ToolCommand, ToolOutput};
pub use detect::{ToolStatus, probe_tool, probe_tools};
pub use dvc::DvcArtifactTracker;
pub use git::GitRevisionControl;

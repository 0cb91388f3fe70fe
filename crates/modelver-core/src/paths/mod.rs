//! Path utilities for locating the project and its registry document.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod error;
mod project;
mod resolver;

#[cfg(test)]
pub(crate) mod test_utils;

// Error type
pub use error::PathError;

// Project root
pub use project::{
    PROJECT_DIR_ENV, ProjectRootResolution, ProjectRootSource, discover_project_root,
    resolve_project_root,
};

// Pure resolver for the CLI
pub use resolver::ResolvedPaths;

//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` kinds to process exit codes and prefixes user-facing
//! messages with the error kind name.

use modelver_core::{CoreError, ErrorKind, PathError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core orchestrator error.
    #[error("{kind}: {message}")]
    Core { kind: ErrorKind, message: String },

    /// Argument or project directory error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error outside the registry (terminal, stdin).
    #[error("IO error: {0}")]
    Io(String),

    /// The user declined a confirmation prompt.
    #[error("Operation cancelled by user")]
    Cancelled,
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Core kinds get distinct codes; the rest follow sysexits.h where one
    /// fits.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core { kind, .. } => kind_exit_code(*kind),
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Cancelled => 1,
        }
    }
}

/// Exit code for a core error kind.
pub const fn kind_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::InvalidInput => 2,
        ErrorKind::DuplicateVersion => 3,
        ErrorKind::VersionNotFound => 4,
        ErrorKind::TrackingFailed => 10,
        ErrorKind::CommitFailed => 11,
        ErrorKind::CheckoutFailed => 12,
        ErrorKind::MaterializeFailed => 13,
        ErrorKind::PublishFailed => 14,
        ErrorKind::RegistryCorrupt => 65, // EX_DATAERR
        ErrorKind::Storage => 74,         // EX_IOERR
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::Core {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code and message for an error that reached `main`.
///
/// Looks through the error chain for a `CoreError` or `CliError`; anything
/// else exits with 1.
pub fn report(err: &anyhow::Error) -> (u8, String) {
    for cause in err.chain() {
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return (kind_exit_code(core.kind()), format!("{}: {err}", core.kind()));
        }
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return (cli.exit_code(), err.to_string());
        }
    }
    (1, format!("{err:#}"))
}

//! Settings domain types and validation.
//!
//! Settings come from the process environment (optionally seeded from a
//! `.env` file by the adapter). All fields are optional; the `effective_*`
//! getters apply defaults.

use std::env;

use serde::{Deserialize, Serialize};

/// Default registry document name, relative to the project root.
pub const DEFAULT_REGISTRY_FILE: &str = "model_registry.json";

/// Default revision-control executable.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Default artifact-tracker executable.
pub const DEFAULT_DVC_PROGRAM: &str = "dvc";

const ENV_REGISTRY_FILE: &str = "MODELVER_REGISTRY_FILE";
const ENV_STRICT_VERSIONS: &str = "MODELVER_STRICT_VERSIONS";
const ENV_COMMIT_REGISTRY: &str = "MODELVER_COMMIT_REGISTRY";
const ENV_GIT: &str = "MODELVER_GIT";
const ENV_DVC: &str = "MODELVER_DVC";

/// Application settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Registry document, relative to the project root or absolute.
    pub registry_file: Option<String>,

    /// Require versions of the form `vX.Y.Z`.
    pub strict_versions: Option<bool>,

    /// Commit the registry document after each registration.
    pub commit_registry: Option<bool>,

    /// Executable used for revision control.
    pub git_program: Option<String>,

    /// Executable used for artifact tracking.
    pub dvc_program: Option<String>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            registry_file: Some(DEFAULT_REGISTRY_FILE.to_string()),
            strict_versions: Some(false),
            commit_registry: Some(true),
            git_program: Some(DEFAULT_GIT_PROGRAM.to_string()),
            dvc_program: Some(DEFAULT_DVC_PROGRAM.to_string()),
        }
    }

    /// Read settings from `MODELVER_*` environment variables.
    ///
    /// Unset or blank variables leave the field `None`.
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            registry_file: env_string(ENV_REGISTRY_FILE),
            strict_versions: env_bool(ENV_STRICT_VERSIONS)?,
            commit_registry: env_bool(ENV_COMMIT_REGISTRY)?,
            git_program: env_string(ENV_GIT),
            dvc_program: env_string(ENV_DVC),
        })
    }

    #[must_use]
    pub fn effective_registry_file(&self) -> &str {
        self.registry_file.as_deref().unwrap_or(DEFAULT_REGISTRY_FILE)
    }

    #[must_use]
    pub fn effective_strict_versions(&self) -> bool {
        self.strict_versions.unwrap_or(false)
    }

    #[must_use]
    pub fn effective_commit_registry(&self) -> bool {
        self.commit_registry.unwrap_or(true)
    }

    #[must_use]
    pub fn effective_git_program(&self) -> &str {
        self.git_program.as_deref().unwrap_or(DEFAULT_GIT_PROGRAM)
    }

    #[must_use]
    pub fn effective_dvc_program(&self) -> &str {
        self.dvc_program.as_deref().unwrap_or(DEFAULT_DVC_PROGRAM)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("{key} must be a boolean (true/false/1/0/yes/no), got '{value}'")]
    InvalidBool { key: String, value: String },

    #[error("Registry file name cannot be empty")]
    EmptyRegistryFile,

    #[error("Program name for {0} cannot be empty")]
    EmptyProgram(&'static str),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings
        .registry_file
        .as_ref()
        .is_some_and(|f| f.trim().is_empty())
    {
        return Err(SettingsError::EmptyRegistryFile);
    }

    if settings
        .git_program
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyProgram("git"));
    }

    if settings
        .dvc_program
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyProgram("dvc"));
    }

    Ok(())
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_bool(key: &str) -> Result<Option<bool>, SettingsError> {
    let Some(value) = env_string(key) else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(SettingsError::InvalidBool {
            key: key.to_string(),
            value,
        }),
    }
}

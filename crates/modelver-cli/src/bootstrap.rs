//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Registry store (via modelver-store)
//! - dvc artifact tracker and git revision control (via modelver-runtime)
//! - Core services (via modelver-core)
//!
//! Command handlers receive the fully-composed `AppCore` and delegate work to it.

use std::path::PathBuf;
use std::sync::Arc;

use modelver_core::{AppCore, Ports, ResolvedPaths, Settings, validate_settings};
use modelver_runtime::{DvcArtifactTracker, GitRevisionControl};
use modelver_store::JsonRegistryStore;
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// `--project-dir`, when given.
    pub project_dir: Option<PathBuf>,
    /// Settings from the environment with command-line overrides applied.
    pub settings: Settings,
}

impl CliConfig {
    /// Read settings from the environment and apply command-line overrides.
    pub fn from_env(
        project_dir: Option<PathBuf>,
        registry: Option<String>,
    ) -> Result<Self, CliError> {
        let settings = Settings::from_env()?;
        Self::new(project_dir, registry, settings)
    }

    /// Apply overrides to `settings` and validate the result.
    pub fn new(
        project_dir: Option<PathBuf>,
        registry: Option<String>,
        mut settings: Settings,
    ) -> Result<Self, CliError> {
        if let Some(registry) = registry {
            settings.registry_file = Some(registry);
        }
        validate_settings(&settings)?;
        Ok(Self {
            project_dir,
            settings,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Resolved project and registry locations.
    pub paths: ResolvedPaths,
    /// Effective settings.
    pub settings: Settings,
}

impl CliContext {
    /// Access the AppCore.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }

    /// Access the resolved paths.
    pub const fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }

    /// Access the effective settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Bootstrap the CLI application.
///
/// This is the composition root. It:
/// 1. Resolves the project directory and registry document
/// 2. Creates the registry store and the git/dvc adapters
/// 3. Assembles the `AppCore` from services
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let CliConfig {
        project_dir,
        settings,
    } = config;

    let paths = ResolvedPaths::resolve(project_dir.as_deref(), settings.effective_registry_file())?;
    debug!(
        project_root = %paths.project_root.display(),
        source = ?paths.project_source,
        registry = %paths.registry_path.display(),
        "Resolved paths"
    );

    let root = &paths.project_root;
    let ports = Ports::new(
        Arc::new(JsonRegistryStore::new(&paths.registry_path)),
        Arc::new(DvcArtifactTracker::new(root, settings.effective_dvc_program())),
        Arc::new(GitRevisionControl::new(root, settings.effective_git_program())),
    );
    let app = AppCore::new(ports, root.clone(), &settings);

    Ok(CliContext {
        app,
        paths,
        settings,
    })
}

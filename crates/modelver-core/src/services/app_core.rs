//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (the CLI, or a
//! test harness) receive an `AppCore` instance and use it to access all
//! functionality.

use std::path::{Path, PathBuf};

use crate::ports::Ports;
use crate::settings::Settings;

use super::{PublishService, PullService, RegistrationService, RegistryService, SwitchService};

/// The core application facade.
///
/// `AppCore` is constructed at the adapter's composition root with concrete
/// port implementations, the resolved project root, and the settings that
/// shape orchestrator behavior.
///
/// # Example
///
/// ```ignore
/// let core = AppCore::new(ports, project_root, &settings);
/// let outcome = core.registration().register(&request)?;
/// core.switching().switch(&SwitchRequest::new("modelA", "v1.0.0"))?;
/// ```
pub struct AppCore {
    project_root: PathBuf,
    registry: RegistryService,
    registration: RegistrationService,
    switching: SwitchService,
    pulls: PullService,
    publishing: PublishService,
}

impl AppCore {
    /// Create a new `AppCore` from its ports.
    pub fn new(ports: Ports, project_root: PathBuf, settings: &Settings) -> Self {
        let registration = RegistrationService::new(
            ports.store.clone(),
            ports.tracker.clone(),
            ports.vcs.clone(),
            project_root.clone(),
        )
        .with_strict_versions(settings.effective_strict_versions())
        .with_registry_commit(settings.effective_commit_registry());

        Self {
            registry: RegistryService::new(ports.store.clone()),
            switching: SwitchService::new(
                ports.store.clone(),
                ports.tracker.clone(),
                ports.vcs.clone(),
            ),
            pulls: PullService::new(ports.store.clone(), ports.tracker.clone()),
            publishing: PublishService::new(ports.store, ports.tracker, ports.vcs),
            registration,
            project_root,
        }
    }

    /// Project directory all tracked paths are relative to.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Access the read-only registry service.
    pub const fn registry(&self) -> &RegistryService {
        &self.registry
    }

    /// Access the registration orchestrator.
    pub const fn registration(&self) -> &RegistrationService {
        &self.registration
    }

    /// Access the switch orchestrator.
    pub const fn switching(&self) -> &SwitchService {
        &self.switching
    }

    /// Access the pull operations.
    pub const fn pulls(&self) -> &PullService {
        &self.pulls
    }

    /// Access the publish operation.
    pub const fn publishing(&self) -> &PublishService {
        &self.publishing
    }
}

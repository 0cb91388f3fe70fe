#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{
    ArtifactKind, ArtifactRecord, PointerRef, RegistrationRequest, RevisionId, VersionRegistry,
    VersionTag, compare_tags, is_version_tag,
};
pub use error::{CommitStep, CoreError, ErrorKind, PublishError};
pub use ports::{
    ArtifactTrackerPort, Ports, RegistryStorePort, RevisionControlPort, TrackerError, VcsError,
};
pub use services::{
    AppCore, PublishService, PullOutcome, PullService, RegistrationOutcome, RegistrationService,
    RegistryCommit, RegistryService, SwitchOutcome, SwitchRequest, SwitchService, SwitchState,
    WorkingTreeState,
};
pub use settings::{
    DEFAULT_DVC_PROGRAM, DEFAULT_GIT_PROGRAM, DEFAULT_REGISTRY_FILE, Settings, SettingsError,
    validate_settings,
};

// Re-export path utilities
pub use paths::{
    PROJECT_DIR_ENV, PathError, ProjectRootResolution, ProjectRootSource, ResolvedPaths,
    discover_project_root, resolve_project_root,
};

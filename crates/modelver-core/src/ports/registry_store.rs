//! Registry store port definition.
//!
//! The store is the single source of truth for which version points to
//! which content. It is loaded fresh for every operation; there is no
//! long-lived cache.

use std::path::Path;

use crate::domain::{ArtifactRecord, VersionRegistry};
use crate::error::CoreError;

/// Port for durable registry persistence.
///
/// Implementations must make `append` atomic with respect to crashes: the
/// persisted document is either the old one or the new one, never a torn
/// write.
pub trait RegistryStorePort: Send + Sync {
    /// Load the registry.
    ///
    /// Returns an empty registry when nothing has been persisted yet and
    /// `RegistryCorrupt` when the document cannot be parsed.
    fn load(&self) -> Result<VersionRegistry, CoreError>;

    /// Append a record and persist the result.
    ///
    /// Fails with `DuplicateVersion` if (model, version) is already present.
    fn append(&self, record: ArtifactRecord) -> Result<(), CoreError>;

    /// Location of the persisted document.
    fn location(&self) -> &Path;

    /// Look up a specific version.
    fn find(&self, model: &str, version: &str) -> Result<ArtifactRecord, CoreError> {
        self.load()?
            .find(model, version)
            .cloned()
            .ok_or_else(|| CoreError::not_found(model, version))
    }

    /// Most recently appended record for `model`.
    fn latest(&self, model: &str) -> Result<ArtifactRecord, CoreError> {
        self.load()?
            .latest(model)
            .cloned()
            .ok_or_else(|| CoreError::not_found(model, "latest"))
    }
}

//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (registry file layout, git, dvc).
//!
//! # Structure
//!
//! - `record` - `ArtifactRecord` and the adapter tokens it carries
//! - `registry` - `VersionRegistry`, the ordered (model, version) collection
//! - `version` - `vX.Y.Z` recognition for strict mode and advisories

mod record;
mod registry;
pub mod version;

pub use record::{ArtifactKind, ArtifactRecord, PointerRef, RegistrationRequest, RevisionId};
pub use registry::VersionRegistry;
pub use version::{VersionTag, compare_tags, is_version_tag};

//! Artifact record domain types.
//!
//! These types describe one registered version of one model, independent of
//! how the registry document is laid out on disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Adapter tokens
// ─────────────────────────────────────────────────────────────────────────────

/// Content reference produced by the artifact tracker.
///
/// The orchestrators treat it as opaque: they store it, compare digests, and
/// hand it back to the tracker to materialize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerRef {
    /// Pointer file path relative to the project root (e.g. `data/x.csv.dvc`).
    pub file: PathBuf,
    /// Content digest recorded in the pointer file.
    pub digest: String,
}

impl PointerRef {
    /// Create a pointer reference.
    pub fn new(file: impl Into<PathBuf>, digest: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            digest: digest.into(),
        }
    }

    /// First eight characters of the digest, for display.
    pub fn short_digest(&self) -> &str {
        self.digest.get(..8).unwrap_or(&self.digest)
    }
}

/// Revision identifier produced by the revision-control adapter at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form (7 characters, git style).
    pub fn short(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// Which command registered an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A data file or folder (`add-data`).
    #[default]
    Data,
    /// A whole model directory (`add-model`).
    Model,
}

impl ArtifactKind {
    /// Label used in terminal output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Data => "File/Folder",
            Self::Model => "Model",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => f.write_str("data"),
            Self::Model => f.write_str("model"),
        }
    }
}

/// One registered version of one model.
///
/// Records are created once by the registration orchestrator and never
/// edited afterwards; a new version is always a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Model name (registry key).
    pub model: String,
    /// Opaque version identifier.
    pub version: String,
    /// Tracked path relative to the project root.
    pub path: PathBuf,
    /// Tracker pointer captured at registration time.
    pub pointer_ref: PointerRef,
    /// Free-form description supplied by the user.
    pub description: String,
    /// Commit that contains the matching pointer file.
    pub revision_id: RevisionId,
    /// UTC timestamp of registration.
    pub created_at: DateTime<Utc>,
    /// Registering command.
    #[serde(default)]
    pub kind: ArtifactKind,
    /// Persisted fields this version of the tool does not know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArtifactRecord {
    /// Build a record from a validated registration and the adapter outputs.
    pub fn from_registration(
        request: &RegistrationRequest,
        pointer_ref: PointerRef,
        revision_id: RevisionId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            model: request.model.clone(),
            version: request.version.clone(),
            path: PathBuf::from(&request.path),
            pointer_ref,
            description: request.description.clone(),
            revision_id,
            created_at,
            kind: request.kind,
            extra: Map::new(),
        }
    }
}

/// A request to register a new version of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub model: String,
    pub version: String,
    /// Path to track, as typed by the user (relative or absolute).
    pub path: String,
    pub description: String,
    pub kind: ArtifactKind,
}

impl RegistrationRequest {
    pub fn new(
        model: impl Into<String>,
        version: impl Into<String>,
        path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            version: version.into(),
            path: path.into(),
            description: description.into(),
            kind: ArtifactKind::Data,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: ArtifactKind) -> Self {
        self.kind = kind;
        self
    }

    /// Commit message for the pointer commit.
    ///
    /// Deterministic in (model, version, description).
    pub fn commit_message(&self) -> String {
        let description = self.description.trim();
        if description.is_empty() {
            format!("[{}] {}", self.model, self.version)
        } else {
            format!("[{}] {}: {}", self.model, self.version, description)
        }
    }
}

//! On-disk layout of the registry document.
//!
//! ```json
//! {
//!   "modelA": [
//!     {
//!       "version": "v1.0.0",
//!       "path": "data/x.csv",
//!       "pointer_ref": { "file": "data/x.csv.dvc", "digest": "3863d0e3..." },
//!       "description": "initial",
//!       "revision_id": "9f1c2ab...",
//!       "created_at": "2024-03-01T12:00:00Z",
//!       "kind": "data"
//!     }
//!   ]
//! }
//! ```
//!
//! The model name is the object key, so entries do not repeat it. Fields
//! this version does not know are kept in `extra` and written back as-is.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use modelver_core::{ArtifactKind, ArtifactRecord, PointerRef, RevisionId, VersionRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Model name to entries, oldest first.
pub type RegistryDocument = BTreeMap<String, Vec<StoredEntry>>;

/// One persisted entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub version: String,
    pub path: PathBuf,
    pub pointer_ref: PointerRef,
    #[serde(default)]
    pub description: String,
    pub revision_id: RevisionId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub kind: ArtifactKind,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredEntry {
    fn from_record(record: &ArtifactRecord) -> Self {
        Self {
            version: record.version.clone(),
            path: record.path.clone(),
            pointer_ref: record.pointer_ref.clone(),
            description: record.description.clone(),
            revision_id: record.revision_id.clone(),
            created_at: record.created_at,
            kind: record.kind,
            extra: record.extra.clone(),
        }
    }

    fn into_record(self, model: &str) -> ArtifactRecord {
        ArtifactRecord {
            model: model.to_string(),
            version: self.version,
            path: self.path,
            pointer_ref: self.pointer_ref,
            description: self.description,
            revision_id: self.revision_id,
            created_at: self.created_at,
            kind: self.kind,
            extra: self.extra,
        }
    }
}

/// Check the record invariants and build the registry.
///
/// Returns the reason the document is unusable on failure.
pub fn into_registry(document: RegistryDocument) -> Result<VersionRegistry, String> {
    let mut records = Vec::new();
    for (model, entries) in document {
        if model.trim().is_empty() {
            return Err("empty model name".to_string());
        }
        for entry in entries {
            if entry.version.trim().is_empty() {
                return Err(format!("'{model}' has an entry without a version"));
            }
            if entry.pointer_ref.digest.trim().is_empty() {
                return Err(format!("'{model}' {} has no pointer digest", entry.version));
            }
            if entry.revision_id.is_empty() {
                return Err(format!("'{model}' {} has no revision id", entry.version));
            }
            records.push(entry.into_record(&model));
        }
    }
    VersionRegistry::from_records(records).map_err(|e| e.to_string())
}

/// Lay the registry out as a document, preserving per-model order.
pub fn from_registry(registry: &VersionRegistry) -> RegistryDocument {
    registry
        .models()
        .map(|model| {
            let entries = registry
                .versions(model)
                .iter()
                .map(StoredEntry::from_record)
                .collect();
            (model.to_string(), entries)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RegistryDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_legacy_entry_without_kind_or_description() {
        let document = parse(
            r#"{"m": [{"version": "v1", "path": "x.csv",
                "pointer_ref": {"file": "x.csv.dvc", "digest": "abc"},
                "revision_id": "r1", "created_at": "2024-01-01T00:00:00Z"}]}"#,
        );
        let registry = into_registry(document).unwrap();
        let record = registry.find("m", "v1").unwrap();
        assert_eq!(record.kind, ArtifactKind::Data);
        assert_eq!(record.description, "");
        assert_eq!(record.model, "m");
    }

    #[test]
    fn test_missing_digest_is_rejected() {
        let document = parse(
            r#"{"m": [{"version": "v1", "path": "x.csv",
                "pointer_ref": {"file": "x.csv.dvc", "digest": ""},
                "revision_id": "r1", "created_at": "2024-01-01T00:00:00Z"}]}"#,
        );
        assert!(into_registry(document).unwrap_err().contains("pointer digest"));
    }

    #[test]
    fn test_missing_revision_is_rejected() {
        let document = parse(
            r#"{"m": [{"version": "v1", "path": "x.csv",
                "pointer_ref": {"file": "x.csv.dvc", "digest": "abc"},
                "revision_id": " ", "created_at": "2024-01-01T00:00:00Z"}]}"#,
        );
        assert!(into_registry(document).unwrap_err().contains("revision id"));
    }

    #[test]
    fn test_duplicate_versions_are_rejected() {
        let entry = r#"{"version": "v1", "path": "x.csv",
            "pointer_ref": {"file": "x.csv.dvc", "digest": "abc"},
            "revision_id": "r1", "created_at": "2024-01-01T00:00:00Z"}"#;
        let document = parse(&format!(r#"{{"m": [{entry}, {entry}]}}"#));
        assert!(into_registry(document).is_err());
    }

    #[test]
    fn test_layout_keeps_extra_fields_and_order() {
        let document = parse(
            r#"{"m": [
                {"version": "v2", "path": "x.csv", "pointer_ref": {"file": "x.csv.dvc", "digest": "b"},
                 "revision_id": "r2", "created_at": "2024-01-02T00:00:00Z", "owner": "ops"},
                {"version": "v1", "path": "x.csv", "pointer_ref": {"file": "x.csv.dvc", "digest": "a"},
                 "revision_id": "r1", "created_at": "2024-01-01T00:00:00Z"}
            ]}"#,
        );
        let registry = into_registry(document.clone()).unwrap();
        assert_eq!(registry.latest("m").unwrap().version, "v1");

        let round = from_registry(&registry);
        assert_eq!(round["m"][0].extra.get("owner"), Some(&Value::from("ops")));
        assert_eq!(round["m"][0].version, "v2");
        assert_eq!(round, document);
    }
}

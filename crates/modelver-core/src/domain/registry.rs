//! The in-memory view of the version registry.

use std::collections::BTreeMap;

use super::record::ArtifactRecord;
use crate::error::CoreError;

/// Ordered collection of artifact records, grouped by model.
///
/// Within a model, records keep insertion order, which is also recency order:
/// the last record of a model is its latest version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionRegistry {
    models: BTreeMap<String, Vec<ArtifactRecord>>,
}

impl VersionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from records in insertion order.
    ///
    /// Fails with `DuplicateVersion` if two records share (model, version).
    pub fn from_records(
        records: impl IntoIterator<Item = ArtifactRecord>,
    ) -> Result<Self, CoreError> {
        let mut registry = Self::new();
        for record in records {
            registry.insert(record)?;
        }
        Ok(registry)
    }

    /// Append a record, refusing to overwrite an existing (model, version).
    pub fn insert(&mut self, record: ArtifactRecord) -> Result<(), CoreError> {
        if self.find(&record.model, &record.version).is_some() {
            return Err(CoreError::DuplicateVersion {
                model: record.model,
                version: record.version,
            });
        }
        self.models
            .entry(record.model.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    /// Look up a specific version of a model.
    pub fn find(&self, model: &str, version: &str) -> Option<&ArtifactRecord> {
        self.versions(model).iter().find(|r| r.version == version)
    }

    /// Most recently registered version of a model.
    pub fn latest(&self, model: &str) -> Option<&ArtifactRecord> {
        self.versions(model).last()
    }

    /// All versions of a model, oldest first.
    pub fn versions(&self, model: &str) -> &[ArtifactRecord] {
        self.models.get(model).map_or(&[], Vec::as_slice)
    }

    /// Registered model names, sorted.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Every record, grouped by model.
    pub fn records(&self) -> impl Iterator<Item = &ArtifactRecord> {
        self.models.values().flatten()
    }

    /// Find which registered version of `model` carries `digest`, if any.
    pub fn version_with_digest(&self, model: &str, digest: &str) -> Option<&ArtifactRecord> {
        self.versions(model)
            .iter()
            .rev()
            .find(|r| r.pointer_ref.digest == digest)
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.models.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PointerRef, RevisionId};
    use chrono::Utc;
    use serde_json::Map;
    use std::path::PathBuf;

    fn record(model: &str, version: &str, digest: &str) -> ArtifactRecord {
        ArtifactRecord {
            model: model.to_string(),
            version: version.to_string(),
            path: PathBuf::from("data/x.csv"),
            pointer_ref: PointerRef::new("data/x.csv.dvc", digest),
            description: String::new(),
            revision_id: RevisionId::new("abc1234"),
            created_at: Utc::now(),
            kind: crate::domain::ArtifactKind::Data,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_find_after_insert_returns_record() {
        let mut registry = VersionRegistry::new();
        let rec = record("modelA", "v1.0.0", "aaa");
        registry.insert(rec.clone()).unwrap();

        assert_eq!(registry.find("modelA", "v1.0.0"), Some(&rec));
        assert!(registry.find("modelA", "v2.0.0").is_none());
        assert!(registry.find("modelB", "v1.0.0").is_none());
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut registry = VersionRegistry::new();
        registry.insert(record("modelA", "v1.0.0", "aaa")).unwrap();

        let err = registry
            .insert(record("modelA", "v1.0.0", "bbb"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateVersion { .. }));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("modelA", "v1.0.0").unwrap().pointer_ref.digest, "aaa");
    }

    #[test]
    fn test_latest_follows_insertion_order() {
        let mut registry = VersionRegistry::new();
        registry.insert(record("modelA", "v2.0.0", "aaa")).unwrap();
        registry.insert(record("modelA", "v1.5.0", "bbb")).unwrap();
        registry.insert(record("modelB", "v9.0.0", "ccc")).unwrap();

        assert_eq!(registry.latest("modelA").unwrap().version, "v1.5.0");
        assert_eq!(registry.versions("modelA").len(), 2);
        assert_eq!(registry.models().collect::<Vec<_>>(), vec!["modelA", "modelB"]);
        assert!(registry.latest("missing").is_none());
    }

    #[test]
    fn test_version_with_digest() {
        let registry = VersionRegistry::from_records([
            record("modelA", "v1.0.0", "aaa"),
            record("modelA", "v1.1.0", "bbb"),
        ])
        .unwrap();

        assert_eq!(
            registry.version_with_digest("modelA", "aaa").map(|r| r.version.as_str()),
            Some("v1.0.0")
        );
        assert!(registry.version_with_digest("modelA", "zzz").is_none());
    }
}

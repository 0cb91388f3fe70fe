//! Read-only registry queries.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{ArtifactRecord, VersionRegistry};
use crate::error::CoreError;
use crate::ports::RegistryStorePort;

/// Service for reading the version registry.
///
/// Every call reloads the persisted document.
pub struct RegistryService {
    store: Arc<dyn RegistryStorePort>,
}

impl RegistryService {
    pub fn new(store: Arc<dyn RegistryStorePort>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<VersionRegistry, CoreError> {
        self.store.load()
    }

    pub fn find(&self, model: &str, version: &str) -> Result<ArtifactRecord, CoreError> {
        self.store.find(model, version)
    }

    pub fn latest(&self, model: &str) -> Result<ArtifactRecord, CoreError> {
        self.store.latest(model)
    }

    /// All versions of `model`, oldest first. Empty when the model is unknown.
    pub fn versions(&self, model: &str) -> Result<Vec<ArtifactRecord>, CoreError> {
        Ok(self.store.load()?.versions(model).to_vec())
    }

    /// Registered model names, sorted.
    pub fn models(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.store.load()?.models().map(str::to_string).collect())
    }

    pub fn location(&self) -> &Path {
        self.store.location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArtifactKind, PointerRef, RevisionId};
    use crate::testing::InMemoryRegistryStore;
    use chrono::Utc;

    fn record(model: &str, version: &str) -> ArtifactRecord {
        ArtifactRecord {
            model: model.to_string(),
            version: version.to_string(),
            path: "data/x.csv".into(),
            pointer_ref: PointerRef::new("data/x.csv.dvc", format!("{model}{version}")),
            description: String::new(),
            revision_id: RevisionId::new("abc1234"),
            created_at: Utc::now(),
            kind: ArtifactKind::Data,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_queries_reflect_store() {
        let store = Arc::new(InMemoryRegistryStore::new());
        for (m, v) in [("b", "v1"), ("a", "v1"), ("a", "v2")] {
            store.append(record(m, v)).unwrap();
        }
        let service = RegistryService::new(store);

        assert_eq!(service.models().unwrap(), vec!["a", "b"]);
        assert_eq!(service.versions("a").unwrap().len(), 2);
        assert_eq!(service.latest("a").unwrap().version, "v2");
        assert_eq!(service.find("b", "v1").unwrap().model, "b");
        assert!(service.versions("zzz").unwrap().is_empty());
        assert!(matches!(
            service.latest("zzz"),
            Err(CoreError::VersionNotFound { .. })
        ));
    }
}

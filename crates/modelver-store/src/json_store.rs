//! File-backed registry store.
//!
//! The document is read fresh on every call and rewritten in full on every
//! append.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use modelver_core::{ArtifactRecord, CoreError, RegistryStorePort, VersionRegistry};
use tracing::debug;

use crate::document::{RegistryDocument, from_registry, into_registry};

/// Registry store persisting a pretty-printed JSON document.
pub struct JsonRegistryStore {
    path: PathBuf,
}

impl JsonRegistryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn storage_error(&self, err: &io::Error) -> CoreError {
        CoreError::Storage {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }

    fn corrupt(&self, reason: impl Into<String>) -> CoreError {
        CoreError::RegistryCorrupt {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    /// Write the registry atomically.
    ///
    /// 1. Write `<file>.tmp` in the same directory and flush it to disk
    /// 2. Rename over the document (atomic on Unix/macOS)
    fn persist(&self, registry: &VersionRegistry) -> Result<(), CoreError> {
        let document = from_registry(registry);
        let mut content = serde_json::to_string_pretty(&document)
            .map_err(|e| self.corrupt(format!("cannot serialize registry: {e}")))?;
        content.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(&e))?;
        }
        let temp_path = temp_path_for(&self.path);
        let write = || -> io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        };
        write().map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.storage_error(&e)
        })?;

        debug!(path = %self.path.display(), records = registry.len(), "Persisted registry");
        Ok(())
    }
}

impl RegistryStorePort for JsonRegistryStore {
    fn load(&self) -> Result<VersionRegistry, CoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No registry yet");
                return Ok(VersionRegistry::new());
            }
            Err(e) => return Err(self.storage_error(&e)),
        };
        if content.trim().is_empty() {
            return Ok(VersionRegistry::new());
        }

        let document: RegistryDocument =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;
        into_registry(document).map_err(|reason| self.corrupt(reason))
    }

    fn append(&self, record: ArtifactRecord) -> Result<(), CoreError> {
        let mut registry = self.load()?;
        registry.insert(record)?;
        self.persist(&registry)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

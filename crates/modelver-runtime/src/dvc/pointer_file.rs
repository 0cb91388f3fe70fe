//! `.dvc` pointer file parsing.
//!
//! ```yaml
//! outs:
//! - md5: 3863d0e317dee0a55c4e59d2ec0eef33
//!   size: 14445097
//!   hash: md5
//!   path: x.csv
//! ```
//!
//! Directories carry an `md5` ending in `.dir`; it is kept verbatim.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use modelver_core::{PointerRef, TrackerError};
use serde::Deserialize;

/// Suffix dvc appends to tracked paths to name their pointer file.
pub const POINTER_EXTENSION: &str = ".dvc";

#[derive(Debug, Deserialize)]
struct DvcFile {
    #[serde(default)]
    outs: Vec<DvcOut>,
}

#[derive(Debug, Deserialize)]
struct DvcOut {
    md5: Option<String>,
}

/// Pointer file dvc writes for `path`.
pub fn pointer_file_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(POINTER_EXTENSION);
    PathBuf::from(name)
}

/// Extract the content digest from pointer file contents.
pub fn parse_digest(content: &str) -> Result<String, String> {
    let file: DvcFile = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    let out = file.outs.into_iter().next().ok_or("no `outs` entry")?;
    let digest = out.md5.ok_or("`outs[0]` has no md5")?;
    if digest.trim().is_empty() {
        return Err("`outs[0].md5` is empty".to_string());
    }
    Ok(digest.trim().to_string())
}

/// Read the pointer file at `root/pointer_file`.
pub fn read(root: &Path, pointer_file: &Path) -> Result<PointerRef, TrackerError> {
    let content = fs::read_to_string(root.join(pointer_file)).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            TrackerError::PathNotFound(pointer_file.to_path_buf())
        } else {
            TrackerError::Io(e.to_string())
        }
    })?;
    let digest = parse_digest(&content).map_err(|reason| TrackerError::MalformedPointer {
        file: pointer_file.to_path_buf(),
        reason,
    })?;
    Ok(PointerRef::new(pointer_file, digest))
}

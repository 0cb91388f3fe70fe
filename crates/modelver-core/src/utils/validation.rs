//! Input validation for orchestrator requests.
//!
//! Every check here runs before any adapter is invoked, so a rejected
//! request never leaves side effects behind.

use std::path::{Component, Path, PathBuf};

use crate::domain::is_version_tag;
use crate::error::CoreError;

/// Trim `value` and reject it when nothing is left.
pub fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

/// Check a version string, enforcing `vX.Y.Z` when `strict` is set.
pub fn validate_version(version: &str, strict: bool) -> Result<(), CoreError> {
    let version = require_non_empty("version", version)?;
    if strict && !is_version_tag(version) {
        return Err(CoreError::invalid(format!(
            "version '{version}' does not match vX.Y.Z"
        )));
    }
    Ok(())
}

/// Turn a user-supplied path into one relative to `root`.
///
/// The path must exist and must not resolve outside the project root.
///
/// # Examples
///
/// ```rust
/// use modelver_core::utils::validation::normalize_tracked_path;
/// use std::path::Path;
/// use tempfile::tempdir;
///
/// let root = tempdir().unwrap();
/// std::fs::create_dir(root.path().join("data")).unwrap();
/// std::fs::write(root.path().join("data/x.csv"), "a,b\n").unwrap();
///
/// let rel = normalize_tracked_path(root.path(), "./data/../data/x.csv").unwrap();
/// assert_eq!(rel, Path::new("data/x.csv"));
/// assert!(normalize_tracked_path(root.path(), "../elsewhere").is_err());
/// ```
pub fn normalize_tracked_path(root: &Path, raw: &str) -> Result<PathBuf, CoreError> {
    let raw = require_non_empty("path", raw)?;
    let path = Path::new(raw);

    let relative = if path.is_absolute() {
        let canonical_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let canonical = path
            .canonicalize()
            .map_err(|_| CoreError::invalid(format!("path '{raw}' does not exist")))?;
        canonical
            .strip_prefix(&canonical_root)
            .map(Path::to_path_buf)
            .map_err(|_| CoreError::invalid(format!("path '{raw}' is outside the project")))?
    } else {
        lexical_normalize(path)
            .ok_or_else(|| CoreError::invalid(format!("path '{raw}' is outside the project")))?
    };

    if relative.as_os_str().is_empty() {
        return Err(CoreError::invalid("cannot track the project root itself"));
    }
    if !root.join(&relative).exists() {
        return Err(CoreError::invalid(format!("path '{raw}' does not exist")));
    }
    Ok(relative)
}

/// Resolve a file requested by `pull-file` against the model's tracked path.
///
/// Absolute paths and paths escaping the model directory are rejected. A
/// path that already starts with the model path is used as-is.
pub fn resolve_pull_target(model_path: &Path, raw: &str) -> Result<PathBuf, CoreError> {
    let raw = require_non_empty("file path", raw)?;
    let path = Path::new(raw);
    if path.is_absolute() {
        return Err(CoreError::invalid(format!(
            "file path '{raw}' must be relative to the model directory"
        )));
    }
    let normalized = lexical_normalize(path)
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| CoreError::invalid(format!("file path '{raw}' escapes the model directory")))?;

    if normalized.starts_with(model_path) {
        Ok(normalized)
    } else {
        Ok(model_path.join(normalized))
    }
}

/// Remove `.` and resolve `..` without touching the filesystem.
///
/// Returns `None` when the path climbs above its starting point.
fn lexical_normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_require_non_empty_trims() {
        assert_eq!(require_non_empty("model", "  modelA ").unwrap(), "modelA");
        assert!(matches!(
            require_non_empty("model", "   "),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_strict_versions() {
        assert!(validate_version("anything-goes", false).is_ok());
        assert!(validate_version("v1.2.3", true).is_ok());
        assert!(validate_version("1.2.3", true).is_err());
        assert!(validate_version("v99999999999999999999.0.0", true).is_ok());
        assert!(validate_version("", false).is_err());
    }

    #[test]
    fn test_absolute_path_inside_root() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("models")).unwrap();
        let abs = root.path().join("models");

        let rel = normalize_tracked_path(root.path(), abs.to_str().unwrap()).unwrap();
        assert_eq!(rel, PathBuf::from("models"));
    }

    #[test]
    fn test_absolute_path_outside_root() {
        let root = tempdir().unwrap();
        let other = tempdir().unwrap();
        fs::write(other.path().join("x.csv"), "x").unwrap();

        let err = normalize_tracked_path(root.path(), other.path().join("x.csv").to_str().unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("outside the project"));
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let root = tempdir().unwrap();
        let err = normalize_tracked_path(root.path(), "data/missing.csv").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_root_itself_is_rejected() {
        let root = tempdir().unwrap();
        assert!(normalize_tracked_path(root.path(), ".").is_err());
    }

    #[test]
    fn test_pull_target_joins_model_path() {
        let model = Path::new("models/clf");
        assert_eq!(
            resolve_pull_target(model, "weights.bin").unwrap(),
            PathBuf::from("models/clf/weights.bin")
        );
        assert_eq!(
            resolve_pull_target(model, "models/clf/weights.bin").unwrap(),
            PathBuf::from("models/clf/weights.bin")
        );
    }

    #[test]
    fn test_pull_target_rejects_escape() {
        let model = Path::new("models/clf");
        assert!(resolve_pull_target(model, "../../secrets").is_err());
        assert!(resolve_pull_target(model, "/etc/passwd").is_err());
        assert!(resolve_pull_target(model, ".").is_err());
    }
}

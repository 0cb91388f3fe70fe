//! Project root resolution.
//!
//! Provides utilities for resolving the project directory from an explicit
//! flag, an environment variable, or by walking up from the working directory.

use std::env;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable naming the project directory.
pub const PROJECT_DIR_ENV: &str = "MODELVER_PROJECT_DIR";

/// Directories whose presence marks a project root.
const ROOT_MARKERS: [&str; 2] = [".git", ".dvc"];

/// How the project root was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectRootSource {
    /// The user passed `--project-dir`.
    Flag,
    /// The path came from `MODELVER_PROJECT_DIR` / `.env`.
    EnvVar,
    /// Nearest ancestor holding a `.git` or `.dvc` directory.
    Discovered,
    /// Fallback: the current directory.
    CurrentDir,
}

/// Resolution result for the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRootResolution {
    /// The resolved project directory (absolute).
    pub path: PathBuf,
    /// How the path was determined.
    pub source: ProjectRootSource,
}

/// Resolve the project root.
///
/// Resolution order:
/// 1. Explicit path provided by caller (highest priority)
/// 2. `MODELVER_PROJECT_DIR` environment variable
/// 3. Nearest ancestor of the current directory with `.git` or `.dvc`
/// 4. The current directory
pub fn resolve_project_root(explicit: Option<&Path>) -> Result<ProjectRootResolution, PathError> {
    let cwd = env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?;

    if let Some(path) = explicit {
        return Ok(ProjectRootResolution {
            path: existing_dir(&cwd, path)?,
            source: ProjectRootSource::Flag,
        });
    }

    if let Ok(env_path) = env::var(PROJECT_DIR_ENV) {
        if !env_path.trim().is_empty() {
            return Ok(ProjectRootResolution {
                path: existing_dir(&cwd, Path::new(env_path.trim()))?,
                source: ProjectRootSource::EnvVar,
            });
        }
    }

    if let Some(found) = discover_project_root(&cwd) {
        return Ok(ProjectRootResolution {
            path: found,
            source: ProjectRootSource::Discovered,
        });
    }

    Ok(ProjectRootResolution {
        path: cwd,
        source: ProjectRootSource::CurrentDir,
    })
}

/// Walk up from `start` looking for a `.git` or `.dvc` directory.
pub fn discover_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|m| dir.join(m).exists()))
        .map(Path::to_path_buf)
}

fn existing_dir(cwd: &Path, path: &Path) -> Result<PathBuf, PathError> {
    if path.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    if !absolute.exists() {
        return Err(PathError::DirectoryNotFound(absolute));
    }
    if !absolute.is_dir() {
        return Err(PathError::NotADirectory(absolute));
    }
    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_finds_nearest_marker() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("project");
        let nested = root.join("data").join("raw");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(root.join(".dvc")).unwrap();

        assert_eq!(discover_project_root(&nested), Some(root));
    }

    #[test]
    fn test_explicit_wins_over_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        let flag_dir = tempdir().unwrap();
        let env_dir = tempdir().unwrap();
        let _env = EnvVarGuard::set(PROJECT_DIR_ENV, env_dir.path().to_str().unwrap());

        let resolved = resolve_project_root(Some(flag_dir.path())).unwrap();
        assert_eq!(resolved.source, ProjectRootSource::Flag);
        assert_eq!(resolved.path, flag_dir.path());
    }

    #[test]
    fn test_env_value_is_used() {
        let _guard = ENV_LOCK.lock().unwrap();
        let env_dir = tempdir().unwrap();
        let _env = EnvVarGuard::set(PROJECT_DIR_ENV, env_dir.path().to_str().unwrap());

        let resolved = resolve_project_root(None).unwrap();
        assert_eq!(resolved.source, ProjectRootSource::EnvVar);
        assert_eq!(resolved.path, env_dir.path());
    }

    #[test]
    fn test_explicit_must_be_directory() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        assert!(matches!(
            resolve_project_root(Some(&file)),
            Err(PathError::NotADirectory(_))
        ));
        assert!(matches!(
            resolve_project_root(Some(&tmp.path().join("missing"))),
            Err(PathError::DirectoryNotFound(_))
        ));
    }
}

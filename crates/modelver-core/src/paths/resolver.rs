//! Pure path resolver for the CLI and tests.
//!
//! Captures every resolved location in one call so `modelver paths` and
//! the composition root agree on where things live.

use std::path::{Path, PathBuf};

use super::{PathError, ProjectRootSource, resolve_project_root};

/// All resolved paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Project directory every relative path is anchored at.
    pub project_root: PathBuf,
    /// How the project directory was resolved.
    pub project_source: ProjectRootSource,
    /// Registry document location.
    pub registry_path: PathBuf,
}

impl ResolvedPaths {
    /// Resolve paths from an optional `--project-dir` and the configured
    /// registry file name (relative names are anchored at the project root).
    pub fn resolve(project_dir: Option<&Path>, registry_file: &str) -> Result<Self, PathError> {
        if registry_file.trim().is_empty() {
            return Err(PathError::EmptyPath);
        }
        let root = resolve_project_root(project_dir)?;
        let registry_path = root.path.join(registry_file.trim());

        Ok(Self {
            project_root: root.path,
            project_source: root.source,
            registry_path,
        })
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "project_root = {}", self.project_root.display())?;
        writeln!(f, "project_source = {:?}", self.project_source)?;
        write!(f, "registry_path = {}", self.registry_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolve_anchors_registry_at_root() {
        let tmp = tempdir().unwrap();
        let paths = ResolvedPaths::resolve(Some(tmp.path()), "model_registry.json").unwrap();

        assert_eq!(paths.project_source, ProjectRootSource::Flag);
        assert_eq!(paths.registry_path, tmp.path().join("model_registry.json"));
    }

    #[test]
    fn resolve_keeps_absolute_registry() {
        let tmp = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        let absolute = elsewhere.path().join("reg.json");
        let paths = ResolvedPaths::resolve(Some(tmp.path()), absolute.to_str().unwrap()).unwrap();

        assert_eq!(paths.registry_path, absolute);
    }

    #[test]
    fn display_format_is_parseable() {
        let tmp = tempdir().unwrap();
        let output = ResolvedPaths::resolve(Some(tmp.path()), "model_registry.json")
            .unwrap()
            .to_string();

        assert!(output.contains("project_root = "));
        assert!(output.contains("project_source = Flag"));
        assert!(output.contains("registry_path = "));
    }
}

//! Port fakes for tests.
//!
//! Enabled for this crate's own tests and for downstream crates through the
//! `test-utils` feature. The tracker and revision-control fakes work on a
//! real directory (usually a `tempfile::TempDir`) so orchestrator tests can
//! assert on file contents, not just on call logs.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::domain::{ArtifactRecord, PointerRef, RevisionId, VersionRegistry};
use crate::error::CoreError;
use crate::ports::{
    ArtifactTrackerPort, RegistryStorePort, RevisionControlPort, TrackerError, VcsError,
};

/// Suffix of the fake tracker's pointer files.
pub const POINTER_SUFFIX: &str = ".ptr";

// ─────────────────────────────────────────────────────────────────────────────
// Registry store
// ─────────────────────────────────────────────────────────────────────────────

/// Registry store held entirely in memory.
pub struct InMemoryRegistryStore {
    location: PathBuf,
    registry: Mutex<VersionRegistry>,
    fail_append: Mutex<bool>,
}

impl InMemoryRegistryStore {
    /// Empty store. Its location lies outside any project, so registry
    /// commits are skipped.
    pub fn new() -> Self {
        Self::with_location(PathBuf::from("/in-memory/model_registry.json"))
    }

    pub fn with_location(location: PathBuf) -> Self {
        Self {
            location,
            registry: Mutex::new(VersionRegistry::new()),
            fail_append: Mutex::new(false),
        }
    }

    /// Make every subsequent `append` fail with a storage error.
    pub fn fail_appends(&self, fail: bool) {
        *self.fail_append.lock().unwrap() = fail;
    }

    /// Snapshot of the current registry.
    pub fn snapshot(&self) -> VersionRegistry {
        self.registry.lock().unwrap().clone()
    }
}

impl Default for InMemoryRegistryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryStorePort for InMemoryRegistryStore {
    fn load(&self) -> Result<VersionRegistry, CoreError> {
        Ok(self.snapshot())
    }

    fn append(&self, record: ArtifactRecord) -> Result<(), CoreError> {
        if *self.fail_append.lock().unwrap() {
            return Err(CoreError::Storage {
                path: self.location.clone(),
                reason: "injected append failure".to_string(),
            });
        }
        self.registry.lock().unwrap().insert(record)
    }

    fn location(&self) -> &Path {
        &self.location
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Artifact tracker
// ─────────────────────────────────────────────────────────────────────────────

/// Content captured by `track`: the tracked path and every file under it,
/// keyed by project-relative path.
#[derive(Debug, Clone)]
struct CachedObject {
    path: PathBuf,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

#[derive(Default)]
struct TrackerState {
    cache: HashMap<String, CachedObject>,
    calls: Vec<String>,
    fail_track: bool,
    fail_materialize: bool,
    fail_push: bool,
}

/// Filesystem-backed tracker that content-addresses with SHA-256.
///
/// Pointer files are written next to the tracked path as `<path>.ptr` and
/// hold the digest. `track` also appends the tracked name to the parent
/// directory's `.gitignore`, mirroring what real trackers do.
pub struct FsArtifactTracker {
    root: PathBuf,
    state: Mutex<TrackerState>,
}

impl FsArtifactTracker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            state: Mutex::new(TrackerState::default()),
        }
    }

    /// Pointer file the fake writes for `path`.
    pub fn pointer_file_for(path: &Path) -> PathBuf {
        PathBuf::from(format!("{}{POINTER_SUFFIX}", path.display()))
    }

    /// Every call made so far, in order (`"track data/x.csv"`, ...).
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Drop an object from the cache, as if it never reached the remote.
    pub fn evict(&self, digest: &str) {
        self.state.lock().unwrap().cache.remove(digest);
    }

    pub fn fail_track(&self, fail: bool) {
        self.state.lock().unwrap().fail_track = fail;
    }

    pub fn fail_materialize(&self, fail: bool) {
        self.state.lock().unwrap().fail_materialize = fail;
    }

    pub fn fail_push(&self, fail: bool) {
        self.state.lock().unwrap().fail_push = fail;
    }

    fn injected(command: &str) -> TrackerError {
        TrackerError::CommandFailed {
            command: command.to_string(),
            code: Some(1),
            stderr: "injected failure".to_string(),
        }
    }

    fn ignore_file_for(path: &Path) -> PathBuf {
        path.parent()
            .map_or_else(|| PathBuf::from(".gitignore"), |p| p.join(".gitignore"))
    }

    fn add_to_ignore(&self, path: &Path) -> Result<(), TrackerError> {
        let ignore = self.root.join(Self::ignore_file_for(path));
        let entry = format!(
            "/{}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        let existing = fs::read_to_string(&ignore).unwrap_or_default();
        if existing.lines().any(|l| l == entry) {
            return Ok(());
        }
        fs::write(&ignore, format!("{existing}{entry}\n")).map_err(io_err)
    }
}

impl ArtifactTrackerPort for FsArtifactTracker {
    fn track(&self, path: &Path) -> Result<PointerRef, TrackerError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("track {}", path.display()));
        if state.fail_track {
            return Err(Self::injected("track"));
        }

        let absolute = self.root.join(path);
        if !absolute.exists() {
            return Err(TrackerError::PathNotFound(path.to_path_buf()));
        }
        let mut files = BTreeMap::new();
        collect_files(&self.root, &absolute, &mut files)?;

        let mut hasher = Sha256::new();
        for (file, bytes) in &files {
            hasher.update(file.to_string_lossy().as_bytes());
            hasher.update([0u8]);
            hasher.update(bytes);
        }
        let digest = format!("{:x}", hasher.finalize());

        let pointer_file = Self::pointer_file_for(path);
        fs::write(self.root.join(&pointer_file), format!("{digest}\n")).map_err(io_err)?;
        self.add_to_ignore(path)?;

        state.cache.insert(
            digest.clone(),
            CachedObject {
                path: path.to_path_buf(),
                files,
            },
        );
        Ok(PointerRef::new(pointer_file, digest))
    }

    fn metadata_files(&self, path: &Path) -> Vec<PathBuf> {
        let ignore = Self::ignore_file_for(path);
        if self.root.join(&ignore).is_file() {
            vec![ignore]
        } else {
            Vec::new()
        }
    }

    fn current(&self, pointer_file: &Path) -> Result<PointerRef, TrackerError> {
        let content = fs::read_to_string(self.root.join(pointer_file)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TrackerError::PathNotFound(pointer_file.to_path_buf())
            } else {
                io_err(e)
            }
        })?;
        let digest = content.trim();
        if digest.is_empty() || digest.contains(char::is_whitespace) {
            return Err(TrackerError::MalformedPointer {
                file: pointer_file.to_path_buf(),
                reason: "expected a single digest".to_string(),
            });
        }
        Ok(PointerRef::new(pointer_file, digest))
    }

    fn materialize(
        &self,
        pointer: &PointerRef,
        target: Option<&Path>,
    ) -> Result<(), TrackerError> {
        let current = self.current(&pointer.file)?;
        let mut state = self.state.lock().unwrap();
        state.calls.push(match target {
            Some(t) => format!("materialize {} {}", pointer.short_digest(), t.display()),
            None => format!("materialize {}", pointer.short_digest()),
        });
        if state.fail_materialize {
            return Err(Self::injected("materialize"));
        }
        if current.digest != pointer.digest {
            return Err(TrackerError::PointerMismatch {
                file: pointer.file.clone(),
                expected: pointer.digest.clone(),
                actual: current.digest,
            });
        }
        let object = state
            .cache
            .get(&pointer.digest)
            .ok_or_else(|| TrackerError::MissingRemoteObject(pointer.digest.clone()))?;

        let selected: Vec<_> = object
            .files
            .iter()
            .filter(|(file, _)| target.is_none_or(|t| file.starts_with(t)))
            .collect();
        if selected.is_empty() {
            return Err(TrackerError::MissingRemoteObject(format!(
                "{} in {}",
                target.unwrap_or(&object.path).display(),
                pointer.short_digest()
            )));
        }

        if target.is_none() {
            let absolute = self.root.join(&object.path);
            if absolute.is_dir() {
                fs::remove_dir_all(&absolute).map_err(io_err)?;
            }
        }
        for (file, bytes) in selected {
            let absolute = self.root.join(file);
            if let Some(parent) = absolute.parent() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
            fs::write(absolute, bytes).map_err(io_err)?;
        }
        Ok(())
    }

    fn push(&self, pointer: &PointerRef) -> Result<(), TrackerError> {
        let current = self.current(&pointer.file)?;
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("push {}", pointer.short_digest()));
        if state.fail_push {
            return Err(Self::injected("push"));
        }
        if current.digest != pointer.digest {
            return Err(TrackerError::PointerMismatch {
                file: pointer.file.clone(),
                expected: pointer.digest.clone(),
                actual: current.digest,
            });
        }
        Ok(())
    }
}

fn collect_files(
    root: &Path,
    current: &Path,
    out: &mut BTreeMap<PathBuf, Vec<u8>>,
) -> Result<(), TrackerError> {
    if current.is_dir() {
        for entry in fs::read_dir(current).map_err(io_err)? {
            collect_files(root, &entry.map_err(io_err)?.path(), out)?;
        }
    } else {
        let relative = current.strip_prefix(root).unwrap_or(current).to_path_buf();
        out.insert(relative, fs::read(current).map_err(io_err)?);
    }
    Ok(())
}

fn io_err(e: std::io::Error) -> TrackerError {
    TrackerError::Io(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Revision control
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Commit {
    id: RevisionId,
    message: String,
    tree: BTreeMap<PathBuf, Vec<u8>>,
}

#[derive(Default)]
struct VcsState {
    staged: BTreeMap<PathBuf, Vec<u8>>,
    commits: Vec<Commit>,
    calls: Vec<String>,
    fail_stage: bool,
    fail_commit: bool,
    fail_checkout: bool,
    fail_push: bool,
}

/// Revision control that snapshots staged files into an in-memory history.
///
/// Revisions are named `rev0001`, `rev0002`, ... and each commit holds the
/// full tree of every path committed so far.
pub struct SnapshotRevisionControl {
    root: PathBuf,
    state: Mutex<VcsState>,
}

impl SnapshotRevisionControl {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            state: Mutex::new(VcsState::default()),
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Commit messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .commits
            .iter()
            .map(|c| c.message.clone())
            .collect()
    }

    /// Paths committed in `revision`'s tree.
    pub fn tree_paths(&self, revision: &RevisionId) -> Vec<PathBuf> {
        self.state
            .lock()
            .unwrap()
            .commits
            .iter()
            .find(|c| &c.id == revision)
            .map(|c| c.tree.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn fail_stage(&self, fail: bool) {
        self.state.lock().unwrap().fail_stage = fail;
    }

    pub fn fail_commit(&self, fail: bool) {
        self.state.lock().unwrap().fail_commit = fail;
    }

    pub fn fail_checkout(&self, fail: bool) {
        self.state.lock().unwrap().fail_checkout = fail;
    }

    pub fn fail_push(&self, fail: bool) {
        self.state.lock().unwrap().fail_push = fail;
    }

    fn injected(command: &str) -> VcsError {
        VcsError::CommandFailed {
            command: command.to_string(),
            code: Some(128),
            stderr: "injected failure".to_string(),
        }
    }
}

impl RevisionControlPort for SnapshotRevisionControl {
    fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!(
            "stage {}",
            paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(",")
        ));
        if state.fail_stage {
            return Err(Self::injected("add"));
        }
        for path in paths {
            let bytes = fs::read(self.root.join(path)).map_err(|_| VcsError::CommandFailed {
                command: "add".to_string(),
                code: Some(128),
                stderr: format!("pathspec '{}' did not match any files", path.display()),
            })?;
            state.staged.insert(path.clone(), bytes);
        }
        Ok(())
    }

    fn commit(&self, message: &str, paths: &[PathBuf]) -> Result<RevisionId, VcsError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("commit {message}"));
        if state.fail_commit {
            return Err(Self::injected("commit"));
        }

        let mut tree = state.commits.last().map(|c| c.tree.clone()).unwrap_or_default();
        let staged: BTreeMap<_, _> = paths
            .iter()
            .filter_map(|p| state.staged.remove_entry(p))
            .collect();
        let before = tree.clone();
        tree.extend(staged);
        if tree == before {
            return Err(VcsError::NothingToCommit);
        }

        let id = RevisionId::new(format!("rev{:04}", state.commits.len() + 1));
        state.commits.push(Commit {
            id: id.clone(),
            message: message.to_string(),
            tree,
        });
        Ok(id)
    }

    fn checkout(&self, revision: &RevisionId, paths: &[PathBuf]) -> Result<(), VcsError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("checkout {revision}"));
        if state.fail_checkout {
            return Err(Self::injected("checkout"));
        }
        let commit = state
            .commits
            .iter()
            .find(|c| &c.id == revision)
            .ok_or_else(|| VcsError::UnknownRevision(revision.to_string()))?;

        for path in paths {
            let bytes = commit.tree.get(path).ok_or_else(|| {
                VcsError::UnknownRevision(format!("{revision}:{}", path.display()))
            })?;
            let absolute = self.root.join(path);
            if let Some(parent) = absolute.parent() {
                fs::create_dir_all(parent).map_err(|e| VcsError::Io(e.to_string()))?;
            }
            fs::write(absolute, bytes).map_err(|e| VcsError::Io(e.to_string()))?;
        }
        Ok(())
    }

    fn push(&self) -> Result<(), VcsError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("push".to_string());
        if state.fail_push {
            return Err(Self::injected("push"));
        }
        Ok(())
    }
}

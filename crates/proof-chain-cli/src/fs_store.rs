// crates/proof-chain-cli/src/fs_store.rs
// ============================================================================
// Module: Filesystem Artifact Store
// Description: Directory-rooted implementation of the artifact store.
// Purpose: Read and atomically replace proof artifacts under one root.
// Dependencies: proof-chain-core, tempfile
// ============================================================================

//! ## Overview
//! Artifact paths are untrusted input. They must be relative, may not climb
//! out of the root with `..`, and are length-limited. Reads are size-bounded;
//! writes go to a temporary file in the target directory and are renamed into
//! place so a reader never observes a half-written document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use proof_chain_core::ArtifactError;
use proof_chain_core::ArtifactStore;
use tempfile::NamedTempFile;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Largest artifact the store will read.
pub const MAX_ARTIFACT_BYTES: usize = 16 * 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Store
// ============================================================================

/// Artifact store rooted at a directory.
///
/// # Invariants
/// - `root` is canonical and names an existing directory.
/// - Every resolved path stays under `root`.
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    /// Canonical root directory.
    root: PathBuf,
}

impl FileArtifactStore {
    /// Opens a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::InvalidPath`] when `root` is not a directory.
    pub fn new(root: &Path) -> Result<Self, ArtifactError> {
        let label = root.display().to_string();
        check_lengths(&label, root)?;
        let root = root.canonicalize().map_err(|err| invalid(&label, &err.to_string()))?;
        if !root.is_dir() {
            return Err(invalid(&label, "not a directory"));
        }
        Ok(Self {
            root,
        })
    }

    /// Returns the canonical root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins a validated relative path onto the root.
    fn join(&self, path: &str) -> Result<PathBuf, ArtifactError> {
        let candidate = Path::new(path);
        check_lengths(path, candidate)?;
        ensure_relative_path(path, candidate)?;
        if candidate.file_name().is_none() {
            return Err(invalid(path, "artifact path missing filename"));
        }
        Ok(self.root.join(candidate))
    }

    /// Confirms an existing path resolves inside the root, following symlinks.
    fn ensure_contained(&self, path: &str, existing: &Path) -> Result<(), ArtifactError> {
        let resolved = existing.canonicalize().map_err(|err| io_error(path, &err))?;
        if !resolved.starts_with(&self.root) {
            return Err(invalid(path, "artifact path escapes store root"));
        }
        Ok(())
    }
}

impl ArtifactStore for FileArtifactStore {
    fn read(&self, path: &str) -> Result<Vec<u8>, ArtifactError> {
        let target = self.join(path)?;
        let resolved = match target.canonicalize() {
            Ok(resolved) => resolved,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ArtifactError::NotFound(path.to_string()));
            }
            Err(err) => return Err(io_error(path, &err)),
        };
        if !resolved.starts_with(&self.root) {
            return Err(invalid(path, "artifact path escapes store root"));
        }
        let file = File::open(&resolved).map_err(|err| io_error(path, &err))?;
        read_with_limit(path, file, MAX_ARTIFACT_BYTES)
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), ArtifactError> {
        let target = self.join(path)?;
        let parent = target
            .parent()
            .ok_or_else(|| invalid(path, "artifact path missing parent"))?
            .to_path_buf();
        fs::create_dir_all(&parent).map_err(|err| io_error(path, &err))?;
        self.ensure_contained(path, &parent)?;
        let mut temp = NamedTempFile::new_in(&parent).map_err(|err| io_error(path, &err))?;
        temp.write_all(bytes).map_err(|err| io_error(path, &err))?;
        temp.as_file().sync_all().map_err(|err| io_error(path, &err))?;
        temp.persist(&target).map_err(|err| io_error(path, &err.error))?;
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool, ArtifactError> {
        let target = self.join(path)?;
        if !target.is_file() {
            return Ok(false);
        }
        self.ensure_contained(path, &target)?;
        Ok(true)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an open file while enforcing a hard size limit.
fn read_with_limit(path: &str, file: File, max_bytes: usize) -> Result<Vec<u8>, ArtifactError> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    let size = file.metadata().map_err(|err| io_error(path, &err))?.len();
    if size > limit {
        return Err(too_large(path, size, max_bytes));
    }
    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|err| io_error(path, &err))?;
    if bytes.len() > max_bytes {
        return Err(too_large(path, u64::try_from(bytes.len()).unwrap_or(u64::MAX), max_bytes));
    }
    Ok(bytes)
}

/// Rejects absolute paths and parent traversal.
fn ensure_relative_path(path: &str, candidate: &Path) -> Result<(), ArtifactError> {
    if candidate.as_os_str().is_empty() {
        return Err(invalid(path, "empty artifact path"));
    }
    for component in candidate.components() {
        match component {
            Component::ParentDir => return Err(invalid(path, "artifact path escapes store root")),
            Component::Prefix(_) | Component::RootDir => {
                return Err(invalid(path, "absolute artifact path not allowed"));
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// Enforces total and per-component length limits.
fn check_lengths(label: &str, path: &Path) -> Result<(), ArtifactError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(invalid(label, "path exceeds limit"));
    }
    if path.components().any(|component| component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH)
    {
        return Err(invalid(label, "path component too long"));
    }
    Ok(())
}

/// Builds an invalid-path error.
fn invalid(path: &str, reason: &str) -> ArtifactError {
    ArtifactError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Builds an I/O error.
fn io_error(path: &str, err: &io::Error) -> ArtifactError {
    ArtifactError::Io {
        path: path.to_string(),
        message: err.to_string(),
    }
}

/// Builds an oversized-artifact error.
fn too_large(path: &str, size: u64, limit: usize) -> ArtifactError {
    ArtifactError::Io {
        path: path.to_string(),
        message: format!("artifact is {size} bytes (limit {limit})"),
    }
}

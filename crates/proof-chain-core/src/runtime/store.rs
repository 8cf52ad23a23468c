// crates/proof-chain-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Collaborators
// Description: In-memory artifact store and proof registry.
// Purpose: Provide deterministic collaborators for tests and local demos.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! Both collaborators keep their state behind `Arc<Mutex<_>>` so clones share
//! one view. They are not intended for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;

use crate::interfaces::ArtifactError;
use crate::interfaces::ArtifactStore;
use crate::interfaces::ProofRegistry;
use crate::interfaces::RegistryError;
use crate::interfaces::RegistryKey;
use crate::interfaces::RegistryRecord;
use crate::interfaces::RegistryUpload;

// ============================================================================
// SECTION: Artifact Store
// ============================================================================

/// In-memory artifact store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryArtifactStore {
    /// Artifact bytes keyed by path.
    artifacts: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryArtifactStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an artifact.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Io`] when the store mutex is poisoned.
    pub fn insert(&self, path: &str, bytes: impl Into<Vec<u8>>) -> Result<(), ArtifactError> {
        self.write(path, &bytes.into())
    }

    /// Returns stored paths in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Io`] when the store mutex is poisoned.
    pub fn paths(&self) -> Result<Vec<String>, ArtifactError> {
        let guard = self.artifacts.lock().map_err(|_| poisoned("*"))?;
        Ok(guard.keys().cloned().collect())
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn read(&self, path: &str) -> Result<Vec<u8>, ArtifactError> {
        let guard = self.artifacts.lock().map_err(|_| poisoned(path))?;
        guard.get(path).cloned().ok_or_else(|| ArtifactError::NotFound(path.to_string()))
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), ArtifactError> {
        self.artifacts.lock().map_err(|_| poisoned(path))?.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool, ArtifactError> {
        let guard = self.artifacts.lock().map_err(|_| poisoned(path))?;
        Ok(guard.contains_key(path))
    }
}

/// Builds the error reported for a poisoned store mutex.
fn poisoned(path: &str) -> ArtifactError {
    ArtifactError::Io {
        path: path.to_string(),
        message: "artifact store mutex poisoned".to_string(),
    }
}

// ============================================================================
// SECTION: Proof Registry
// ============================================================================

/// In-memory proof registry for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProofRegistry {
    /// Latest row per key.
    rows: Arc<Mutex<BTreeMap<RegistryKey, RegistryRecord>>>,
    /// Filenames whose queries fail.
    failing: Arc<Mutex<BTreeSet<String>>>,
    /// Upserts in arrival order.
    uploads: Arc<Mutex<Vec<(RegistryKey, RegistryUpload)>>>,
}

impl InMemoryProofRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Primes the latest row for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] when the registry mutex is poisoned.
    pub fn insert(&self, key: RegistryKey, record: RegistryRecord) -> Result<(), RegistryError> {
        self.rows.lock().map_err(|_| registry_poisoned())?.insert(key, record);
        Ok(())
    }

    /// Makes every query for `filename` fail as unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] when the registry mutex is poisoned.
    pub fn fail_filename(&self, filename: &str) -> Result<(), RegistryError> {
        self.failing.lock().map_err(|_| registry_poisoned())?.insert(filename.to_string());
        Ok(())
    }

    /// Returns recorded upserts in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] when the registry mutex is poisoned.
    pub fn uploads(&self) -> Result<Vec<(RegistryKey, RegistryUpload)>, RegistryError> {
        Ok(self.uploads.lock().map_err(|_| registry_poisoned())?.clone())
    }

    /// Fails when `filename` was marked as failing.
    fn check_available(&self, filename: &str) -> Result<(), RegistryError> {
        if self.failing.lock().map_err(|_| registry_poisoned())?.contains(filename) {
            return Err(RegistryError::Unavailable(format!("simulated outage for {filename}")));
        }
        Ok(())
    }
}

impl ProofRegistry for InMemoryProofRegistry {
    fn get_latest(&self, key: &RegistryKey) -> Result<Option<RegistryRecord>, RegistryError> {
        self.check_available(&key.filename)?;
        Ok(self.rows.lock().map_err(|_| registry_poisoned())?.get(key).cloned())
    }

    fn upsert(&self, key: &RegistryKey, upload: &RegistryUpload) -> Result<(), RegistryError> {
        self.check_available(&key.filename)?;
        self.rows.lock().map_err(|_| registry_poisoned())?.insert(
            key.clone(),
            RegistryRecord {
                sha256: Some(upload.sha256.clone()),
                uploaded_at: Some(upload.uploaded_at.clone()),
            },
        );
        self.uploads.lock().map_err(|_| registry_poisoned())?.push((key.clone(), upload.clone()));
        Ok(())
    }
}

/// Builds the error reported for a poisoned registry mutex.
fn registry_poisoned() -> RegistryError {
    RegistryError::Unavailable("proof registry mutex poisoned".to_string())
}

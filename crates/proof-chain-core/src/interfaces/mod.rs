// crates/proof-chain-core/src/interfaces/mod.rs
// ============================================================================
// Module: Proof Chain Interfaces
// Description: Backend-agnostic interfaces for artifact storage and registries.
// Purpose: Define the contract surfaces used by the proof-chain runtime.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The runtime never touches the filesystem or network directly. Artifacts are
//! read and written through [`ArtifactStore`] and remote digests are fetched
//! through [`ProofRegistry`]. Implementations must fail closed on missing or
//! invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::TenantId;

// ============================================================================
// SECTION: Artifact Store
// ============================================================================

/// Artifact store errors.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Artifact does not exist.
    #[error("artifact not found: {0}")]
    NotFound(String),
    /// Artifact path was rejected by the store.
    #[error("invalid artifact path {path}: {reason}")]
    InvalidPath {
        /// Offending path.
        path: String,
        /// Rejection reason.
        reason: String,
    },
    /// Store I/O error.
    #[error("artifact io error for {path}: {message}")]
    Io {
        /// Artifact path.
        path: String,
        /// Error detail.
        message: String,
    },
}

/// Byte-level artifact storage addressed by relative path.
pub trait ArtifactStore {
    /// Reads artifact bytes exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::NotFound`] when the artifact is absent.
    fn read(&self, path: &str) -> Result<Vec<u8>, ArtifactError>;

    /// Replaces the artifact at `path` with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError`] when the write fails.
    fn write(&self, path: &str, bytes: &[u8]) -> Result<(), ArtifactError>;

    /// Returns true when an artifact exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError`] when the path is rejected or cannot be inspected.
    fn exists(&self, path: &str) -> Result<bool, ArtifactError>;
}

// ============================================================================
// SECTION: Proof Registry
// ============================================================================

/// Registry lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryKey {
    /// Tenant scope.
    pub tenant_id: TenantId,
    /// Artifact filename.
    pub filename: String,
}

/// Most recent registry row for a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryRecord {
    /// Recorded digest, when the row carries one.
    pub sha256: Option<String>,
    /// Upload time reported by the registry.
    pub uploaded_at: Option<String>,
}

/// Row pushed to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryUpload {
    /// Raw-byte digest of the artifact.
    pub sha256: String,
    /// Upload time.
    pub uploaded_at: String,
    /// Parsed artifact body.
    pub payload: Value,
}

/// Registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Registry could not be reached.
    #[error("registry unavailable: {0}")]
    Unavailable(String),
    /// Registry answered with a failure status.
    #[error("registry rejected request with status {status}: {message}")]
    Rejected {
        /// Response status code.
        status: u16,
        /// Response detail.
        message: String,
    },
    /// Registry answered with a body that could not be interpreted.
    #[error("invalid registry response: {0}")]
    InvalidResponse(String),
}

/// Remote store of proof digests keyed by tenant and filename.
pub trait ProofRegistry {
    /// Returns the most recent row for `key`, or `None` when no row exists.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the query fails.
    fn get_latest(&self, key: &RegistryKey) -> Result<Option<RegistryRecord>, RegistryError>;

    /// Inserts or merges a row for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the write fails.
    fn upsert(&self, key: &RegistryKey, upload: &RegistryUpload) -> Result<(), RegistryError>;
}

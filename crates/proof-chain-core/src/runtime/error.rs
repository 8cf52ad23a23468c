// crates/proof-chain-core/src/runtime/error.rs
// ============================================================================
// Module: Proof Chain Errors
// Description: Failure taxonomy shared by every runtime component.
// Purpose: Report each refusal with enough detail to reproduce it by hand.
// Dependencies: crate::{core, interfaces}, thiserror
// ============================================================================

//! ## Overview
//! Integrity and freshness violations are always fatal. Each variant carries
//! the file, digest, or timestamp pair that caused the refusal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::hashing::HashError;
use crate::core::identifiers::ReceiptId;
use crate::interfaces::ArtifactError;
use crate::interfaces::RegistryError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Proof-chain runtime errors.
#[derive(Debug, Error)]
pub enum ProofError {
    /// Required input artifact is absent.
    #[error("missing input: {path}")]
    ArtifactMissing {
        /// Artifact path.
        path: String,
    },
    /// Artifact store failure other than absence.
    #[error(transparent)]
    Artifact(ArtifactError),
    /// Document could not be parsed.
    #[error("malformed document {path}: {reason}")]
    Malformed {
        /// Document path.
        path: String,
        /// Parse failure detail.
        reason: String,
    },
    /// Bundle lists no proofs.
    #[error("bundle {path} lists no proofs")]
    EmptyBundle {
        /// Bundle path.
        path: String,
    },
    /// Proof name listed more than once.
    #[error("proof {name} listed more than once")]
    DuplicateProof {
        /// Repeated name.
        name: String,
    },
    /// Artifact bytes no longer match the recorded digest.
    #[error("hash mismatch for {name}: expected {expected}, actual {actual}")]
    HashMismatch {
        /// Artifact name.
        name: String,
        /// Recorded digest.
        expected: String,
        /// Recomputed digest.
        actual: String,
    },
    /// Recomputed bundle digest differs from `bundle_sha256`.
    #[error("bundle digest mismatch for {path}: expected {expected}, actual {actual}")]
    BundleDigestMismatch {
        /// Bundle path.
        path: String,
        /// Recorded digest.
        expected: String,
        /// Recomputed digest.
        actual: String,
    },
    /// Pre-certification references a different bundle.
    #[error("pre-cert {field} mismatch: expected {expected}, actual {actual}")]
    PreCertBundleMismatch {
        /// Compared field.
        field: String,
        /// Value from the verified bundle.
        expected: String,
        /// Value recorded in the pre-certification.
        actual: String,
    },
    /// Pre-certification seal does not fingerprint its bundle digest.
    #[error("seal mismatch: expected {expected}, actual {actual}")]
    SealMismatch {
        /// Recomputed seal.
        expected: String,
        /// Recorded seal.
        actual: String,
    },
    /// Required timestamp absent or unparseable.
    #[error("invalid timestamp for {field}: '{value}'")]
    InvalidTimestamp {
        /// Field label.
        field: String,
        /// Offending text (empty when absent).
        value: String,
    },
    /// Two certification timestamps are further apart than the window.
    #[error(
        "timestamp window exceeded between {first} and {second}: {distance_seconds}s > \
         {window_seconds}s"
    )]
    TimestampWindowExceeded {
        /// First timestamp label.
        first: String,
        /// Second timestamp label.
        second: String,
        /// Measured distance in whole seconds.
        distance_seconds: i64,
        /// Configured window in seconds.
        window_seconds: i64,
    },
    /// Upstream integrity report did not pass.
    #[error("integrity gate failed: {path} reports passed=false")]
    IntegrityGateFailed {
        /// Integrity report path.
        path: String,
    },
    /// Receipt ids decrease in ledger order.
    #[error("non-monotonic receipt at position {position}: {current} follows {previous}")]
    NonMonotonicReceipt {
        /// Index of the offending receipt.
        position: usize,
        /// Preceding receipt id.
        previous: ReceiptId,
        /// Offending receipt id.
        current: ReceiptId,
    },
    /// Receipt index digest no longer matches its contents.
    #[error("receipt index digest mismatch for {path}: expected {expected}, actual {actual}")]
    IndexDigestMismatch {
        /// Index path.
        path: String,
        /// Recorded digest.
        expected: String,
        /// Recomputed digest.
        actual: String,
    },
    /// Remote registry failure.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Canonical hashing failure.
    #[error(transparent)]
    Hash(#[from] HashError),
    /// Document serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<ArtifactError> for ProofError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::NotFound(path) => Self::ArtifactMissing {
                path,
            },
            other => Self::Artifact(other),
        }
    }
}

// crates/proof-chain-core/src/core/seal.rs
// ============================================================================
// Module: Meta-Seal Documents
// Description: Rotating meta-seal schema and integrity gate input.
// Purpose: Bind bundle, summary, and integrity report digests on a cadence.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A meta-seal is re-issued on a fixed cadence. Its `meta_hash` is the
//! canonical digest of every other field, so two rotations over identical
//! inputs at the same rotation time produce identical seals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Phase label stamped on meta-seals.
pub const META_SEAL_PHASE: &str = "meta_seal_rotation";
/// Field excluded from the meta-seal self digest.
pub const META_SEAL_DIGEST_FIELD: &str = "meta_hash";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Integrity gate fields read from an external integrity report.
///
/// # Invariants
/// - A missing `passed` field reads as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct IntegrityGate {
    /// Whether the upstream integrity check passed.
    #[serde(default)]
    pub passed: bool,
}

/// Rotating meta-seal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSeal {
    /// Version label (summary generation date, or rotation date).
    pub version: String,
    /// Phase label.
    pub phase: String,
    /// Governance gate identifier.
    pub gate: String,
    /// Rotation cadence label.
    pub cadence: String,
    /// Rotation time.
    pub rotated_at: String,
    /// Sealed bundle.
    pub bundle: SealedBundle,
    /// Sealed summary.
    pub summary: SealedFile,
    /// Integrity report the rotation was gated on.
    pub integrity_report: SealedIntegrityReport,
    /// Canonical digest over every other field.
    pub meta_hash: String,
}

/// Bundle as recorded by a meta-seal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedBundle {
    /// Bundle path.
    pub path: String,
    /// Recorded (and re-verified) `bundle_sha256`.
    pub sha256: String,
    /// Raw-byte digest of the bundle file.
    pub file_sha256: String,
}

/// Generic file as recorded by a meta-seal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedFile {
    /// File path.
    pub path: String,
    /// Raw-byte digest.
    pub sha256: String,
}

/// Integrity report as recorded by a meta-seal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedIntegrityReport {
    /// Report path.
    pub path: String,
    /// Raw-byte digest.
    pub sha256: String,
    /// Gate flag at rotation time.
    pub passed: bool,
}

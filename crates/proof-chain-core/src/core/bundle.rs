// crates/proof-chain-core/src/core/bundle.rs
// ============================================================================
// Module: Proof Bundle Manifest
// Description: Proof bundle schema and aggregate digest rules.
// Purpose: Provide the canonical bundle manifest used by every certification stage.
// Dependencies: crate::core::hashing, serde
// ============================================================================

//! ## Overview
//! A bundle lists proof artifacts with their recorded raw-byte digests and an
//! aggregate `bundle_sha256`. The aggregate is computed over the entries
//! restricted to `{name, sha256, phase, generated_at}` and sorted by name, so
//! manifest ordering and extra per-entry fields never change it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;

// ============================================================================
// SECTION: Manifest Types
// ============================================================================

/// One proof artifact referenced by a bundle.
///
/// # Invariants
/// - `sha256` is the raw-byte digest of the artifact at `name`.
/// - Unknown manifest fields are dropped on load and never hashed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofEntry {
    /// Artifact path, relative to the artifact store root.
    pub name: String,
    /// Recorded content digest.
    pub sha256: String,
    /// Free-text lifecycle tag.
    #[serde(default)]
    pub phase: Option<String>,
    /// Generation time reported by the producer.
    #[serde(default)]
    pub generated_at: Option<String>,
}

/// Proof bundle manifest.
///
/// # Invariants
/// - `bundle_sha256` equals [`bundle_digest`] over `proofs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBundle {
    /// Bundle creation time.
    pub bundle_created_at: String,
    /// Aggregate digest over the normalized entry list.
    pub bundle_sha256: String,
    /// Proof entries (order is not significant).
    #[serde(default)]
    pub proofs: Vec<ProofEntry>,
}

/// Self-reported metadata read from a proof artifact body.
///
/// # Invariants
/// - Every field is optional; artifacts are produced outside this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArtifactHeader {
    /// Lifecycle tag reported by the artifact.
    #[serde(default)]
    pub phase: Option<String>,
    /// Generation time reported by the artifact.
    #[serde(default)]
    pub generated_at: Option<String>,
    /// Digest the artifact reports for itself.
    #[serde(default)]
    pub sha256: Option<String>,
}

// ============================================================================
// SECTION: Digest Rules
// ============================================================================

/// Returns entries sorted by name with only the hashed fields retained.
#[must_use]
pub fn normalize_entries(entries: &[ProofEntry]) -> Vec<ProofEntry> {
    let mut normalized = entries.to_vec();
    normalized.sort_by(|left, right| left.name.cmp(&right.name));
    normalized
}

/// Computes the aggregate bundle digest for a list of entries.
///
/// # Errors
///
/// Returns [`HashError`] when canonicalization fails.
pub fn bundle_digest(entries: &[ProofEntry]) -> Result<String, HashError> {
    hash_canonical_json(&normalize_entries(entries))
}

// crates/proof-chain-core/src/core/certificate.rs
// ============================================================================
// Module: Certification Documents
// Description: Pre-certification and meta-certification schemas.
// Purpose: Define the documents that seal a verified bundle.
// Dependencies: crate::core::{bundle, hashing}, serde
// ============================================================================

//! ## Overview
//! A pre-certification seals one bundle digest one hash-step removed
//! (`seal = digest(bundle_sha256)`), so a copy of the bundle file cannot stand
//! in for a certificate. A meta-certification cross-validates bundle and
//! pre-certification and emits the terminal `meta_hash` downstream gates key on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::bundle::ProofEntry;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_bytes;
use crate::core::hashing::hash_canonical_json;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Phase label stamped on pre-certifications.
pub const PRE_CERT_PHASE: &str = "pre-cert";
/// Phase label stamped on meta-certifications.
pub const META_CERT_PHASE: &str = "meta-cert";

// ============================================================================
// SECTION: Pre-Certification
// ============================================================================

/// Reference to a bundle by path and recorded aggregate digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleRef {
    /// Bundle path in the artifact store.
    pub path: String,
    /// Recorded `bundle_sha256` of the referenced bundle.
    pub sha256: String,
}

/// Pre-certification sealing one bundle digest.
///
/// # Invariants
/// - `seal == seal_for(bundle.sha256)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreCertification {
    /// Phase label.
    #[serde(default = "default_pre_cert_phase")]
    pub phase: String,
    /// Generation time.
    pub generated_at: String,
    /// Referenced bundle.
    pub bundle: BundleRef,
    /// Fingerprint of the referenced bundle digest.
    pub seal: String,
}

/// Default phase for pre-certifications missing the field.
fn default_pre_cert_phase() -> String {
    PRE_CERT_PHASE.to_string()
}

/// Computes the pre-certification seal for a bundle digest.
#[must_use]
pub fn seal_for(bundle_sha256: &str) -> String {
    hash_bytes(bundle_sha256.as_bytes())
}

// ============================================================================
// SECTION: Meta-Certification
// ============================================================================

/// Meta-certification: the terminal proof over a bundle and its pre-certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaCertification {
    /// Release label.
    pub version: String,
    /// Phase label.
    pub phase: String,
    /// Governance gate identifier.
    pub gate: String,
    /// Generation time.
    pub generated_at: String,
    /// Certified inputs.
    pub inputs: MetaCertInputs,
    /// Proof lineage covered by the certificate.
    pub lineage: MetaCertLineage,
    /// Aggregate digest over bundle, pre-certification, and proof chain.
    pub meta_hash: String,
}

/// Inputs recorded by a meta-certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaCertInputs {
    /// Bundle input.
    pub bundle: MetaCertBundleInput,
    /// Pre-certification input.
    pub pre_cert: MetaCertPreCertInput,
}

/// Bundle as recorded by a meta-certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaCertBundleInput {
    /// Bundle path.
    pub path: String,
    /// Verified `bundle_sha256`.
    pub sha256: String,
    /// Bundle creation time.
    pub created_at: String,
}

/// Pre-certification as recorded by a meta-certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaCertPreCertInput {
    /// Pre-certification path.
    pub path: String,
    /// Canonical digest of the pre-certification document.
    pub sha256: String,
    /// Raw-byte digest of the pre-certification file.
    pub file_sha256: String,
    /// Verified seal.
    pub seal: String,
    /// Pre-certification generation time.
    pub generated_at: String,
}

/// Proof lineage recorded by a meta-certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaCertLineage {
    /// Normalized proof entries.
    pub proofs: Vec<ProofEntry>,
    /// Sorted distinct phases.
    pub phases: Vec<String>,
    /// Span across every proof, bundle, and pre-certification timestamp.
    pub timestamp_window_seconds: i64,
    /// Configured freshness window.
    pub window_seconds: i64,
    /// Whether the span fits the window (always true on emitted certificates).
    pub within_window: bool,
}

/// Proof chain link hashed into the meta-hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ProofLink<'a> {
    /// Artifact name.
    name: &'a str,
    /// Recorded digest.
    sha256: &'a str,
}

/// Meta-hash payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct MetaHashPayload<'a> {
    /// Verified bundle digest.
    bundle_sha: &'a str,
    /// Canonical pre-certification digest.
    pre_cert_sha: &'a str,
    /// Name-sorted proof chain.
    proof_chain: Vec<ProofLink<'a>>,
}

/// Computes `meta_hash` over bundle digest, pre-certification digest, and proof chain.
///
/// # Errors
///
/// Returns [`HashError`] when canonicalization fails.
pub fn meta_hash(
    bundle_sha: &str,
    pre_cert_sha: &str,
    proofs: &[ProofEntry],
) -> Result<String, HashError> {
    let mut proof_chain: Vec<ProofLink<'_>> = proofs
        .iter()
        .map(|proof| ProofLink {
            name: &proof.name,
            sha256: &proof.sha256,
        })
        .collect();
    proof_chain.sort_by(|left, right| left.name.cmp(right.name));
    hash_canonical_json(&MetaHashPayload {
        bundle_sha,
        pre_cert_sha,
        proof_chain,
    })
}

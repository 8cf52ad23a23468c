// crates/proof-chain-core/src/runtime/verifier.rs
// ============================================================================
// Module: Chain Verifier
// Description: Recomputes member and aggregate digests of a proof bundle.
// Purpose: Decide whether a bundle is trustworthy before anything certifies it.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! Verification is binary. The first missing artifact, digest mismatch, or
//! unparseable timestamp aborts the run; there is no partial result.
//!
//! Security posture: bundle manifests and artifacts are untrusted input and
//! every recorded digest is recomputed from stored bytes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::bundle::ProofBundle;
use crate::core::bundle::ProofEntry;
use crate::core::bundle::bundle_digest;
use crate::core::bundle::normalize_entries;
use crate::core::hashing::hash_bytes;
use crate::core::time::Timestamp;
use crate::interfaces::ArtifactStore;
use crate::runtime::documents::parse_document;
use crate::runtime::documents::parse_timestamp;
use crate::runtime::error::ProofError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Proof entry with its parsed generation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedProof {
    /// Artifact name.
    pub name: String,
    /// Parsed `generated_at`.
    pub generated_at: Timestamp,
}

/// Bundle that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedBundle {
    /// Bundle path.
    pub path: String,
    /// Verified aggregate digest.
    pub bundle_sha256: String,
    /// Raw-byte digest of the bundle file.
    pub file_sha256: String,
    /// Bundle creation time as written.
    pub created_at_text: String,
    /// Parsed bundle creation time.
    pub created_at: Timestamp,
    /// Name-sorted normalized entries.
    pub proofs: Vec<ProofEntry>,
    /// Parsed proof timestamps in name order.
    pub timestamps: Vec<TimedProof>,
    /// Sorted distinct phases.
    pub phases: Vec<String>,
}

impl VerifiedBundle {
    /// Returns the proof with the earliest timestamp (ties broken by name).
    #[must_use]
    pub fn earliest_proof(&self) -> Option<&TimedProof> {
        self.timestamps.iter().min_by(|left, right| left.generated_at.cmp(&right.generated_at))
    }

    /// Returns the proof with the latest timestamp (ties broken by name).
    #[must_use]
    pub fn latest_proof(&self) -> Option<&TimedProof> {
        self.timestamps
            .iter()
            .rev()
            .max_by(|left, right| left.generated_at.cmp(&right.generated_at))
    }
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// Chain verifier over an artifact store.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainVerifier;

impl ChainVerifier {
    /// Creates a new verifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Loads and verifies the bundle stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] on the first failed check.
    pub fn verify_bundle<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        path: &str,
    ) -> Result<VerifiedBundle, ProofError> {
        let bytes = store.read(path)?;
        let bundle: ProofBundle = parse_document(path, &bytes)?;
        self.verify_manifest(store, path, &bundle, hash_bytes(&bytes))
    }

    /// Verifies an already-parsed bundle manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] on the first failed check.
    pub fn verify_manifest<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        path: &str,
        bundle: &ProofBundle,
        file_sha256: String,
    ) -> Result<VerifiedBundle, ProofError> {
        if bundle.proofs.is_empty() {
            return Err(ProofError::EmptyBundle {
                path: path.to_string(),
            });
        }
        ensure_unique_names(bundle.proofs.iter().map(|entry| entry.name.as_str()))?;

        for entry in &bundle.proofs {
            let artifact = store.read(&entry.name)?;
            let actual = hash_bytes(&artifact);
            tracing::debug!(
                target: "proof_chain.verifier",
                artifact = %entry.name,
                sha256 = %actual,
                "artifact digest"
            );
            if actual != entry.sha256 {
                return Err(ProofError::HashMismatch {
                    name: entry.name.clone(),
                    expected: entry.sha256.clone(),
                    actual,
                });
            }
        }

        check_bundle_digest(path, bundle)?;

        let proofs = normalize_entries(&bundle.proofs);
        let mut timestamps = Vec::with_capacity(proofs.len());
        let mut phases = BTreeSet::new();
        for entry in &proofs {
            let field = format!("proofs[{}].generated_at", entry.name);
            let generated_at = parse_timestamp(&field, entry.generated_at.as_deref())?;
            timestamps.push(TimedProof {
                name: entry.name.clone(),
                generated_at,
            });
            if let Some(phase) = &entry.phase {
                phases.insert(phase.clone());
            }
        }
        let created_at = parse_timestamp("bundle_created_at", Some(&bundle.bundle_created_at))?;

        tracing::info!(
            target: "proof_chain.verifier",
            bundle = %path,
            proofs = proofs.len(),
            bundle_sha256 = %bundle.bundle_sha256,
            "bundle verified"
        );
        Ok(VerifiedBundle {
            path: path.to_string(),
            bundle_sha256: bundle.bundle_sha256.clone(),
            file_sha256,
            created_at_text: bundle.bundle_created_at.clone(),
            created_at,
            proofs,
            timestamps,
            phases: phases.into_iter().collect(),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Recomputes the aggregate digest and compares it with `bundle_sha256`.
pub(crate) fn check_bundle_digest(path: &str, bundle: &ProofBundle) -> Result<(), ProofError> {
    let actual = bundle_digest(&bundle.proofs)?;
    if actual != bundle.bundle_sha256 {
        return Err(ProofError::BundleDigestMismatch {
            path: path.to_string(),
            expected: bundle.bundle_sha256.clone(),
            actual,
        });
    }
    Ok(())
}

/// Rejects manifests that list one name twice.
pub(crate) fn ensure_unique_names<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), ProofError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ProofError::DuplicateProof {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

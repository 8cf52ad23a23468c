// crates/proof-chain-core/src/runtime/builder.rs
// ============================================================================
// Module: Bundle Builder
// Description: Assembles a proof bundle manifest from stored artifacts.
// Purpose: Produce manifests that the chain verifier accepts by construction.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! Each named artifact is read once, hashed over its raw bytes, and described
//! by the `phase` and `generated_at` it reports about itself. Artifacts that
//! report no generation time inherit the bundle creation time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::bundle::ArtifactHeader;
use crate::core::bundle::ProofBundle;
use crate::core::bundle::ProofEntry;
use crate::core::bundle::bundle_digest;
use crate::core::bundle::normalize_entries;
use crate::core::hashing::hash_bytes;
use crate::core::time::Timestamp;
use crate::interfaces::ArtifactStore;
use crate::runtime::documents::parse_document;
use crate::runtime::error::ProofError;
use crate::runtime::verifier::ensure_unique_names;

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builds proof bundles from artifacts in a store.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleBuilder;

impl BundleBuilder {
    /// Creates a new builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds a bundle over `names`, stamped with `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] when the list is empty or repeats a name, or an
    /// artifact is missing or not a JSON document.
    pub fn build<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        names: &[String],
        created_at: Timestamp,
    ) -> Result<ProofBundle, ProofError> {
        if names.is_empty() {
            return Err(ProofError::EmptyBundle {
                path: "<new bundle>".to_string(),
            });
        }
        ensure_unique_names(names.iter().map(String::as_str))?;

        let created_text = created_at.to_string();
        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let bytes = store.read(name)?;
            let header: ArtifactHeader = parse_document(name, &bytes)?;
            entries.push(ProofEntry {
                name: name.clone(),
                sha256: hash_bytes(&bytes),
                phase: header.phase,
                generated_at: Some(header.generated_at.unwrap_or_else(|| created_text.clone())),
            });
        }

        let proofs = normalize_entries(&entries);
        let bundle_sha256 = bundle_digest(&proofs)?;
        tracing::info!(
            target: "proof_chain.builder",
            proofs = proofs.len(),
            bundle_sha256 = %bundle_sha256,
            "bundle built"
        );
        Ok(ProofBundle {
            bundle_created_at: created_text,
            bundle_sha256,
            proofs,
        })
    }
}

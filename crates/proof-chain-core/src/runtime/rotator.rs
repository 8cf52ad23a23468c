// crates/proof-chain-core/src/runtime/rotator.rs
// ============================================================================
// Module: Seal Rotator
// Description: Periodic meta-seal over bundle, summary, and integrity report.
// Purpose: Re-seal the proof chain on a cadence, gated on an upstream check.
// Dependencies: crate::{core, interfaces, runtime::verifier}, serde, tracing
// ============================================================================

//! ## Overview
//! Rotation refuses to run unless the integrity report says `passed: true`.
//! Every check completes before anything is written, so a failed rotation
//! never leaves a partial seal behind.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;

use crate::core::bundle::ProofBundle;
use crate::core::hashing::hash_bytes;
use crate::core::hashing::self_digest;
use crate::core::seal::IntegrityGate;
use crate::core::seal::META_SEAL_DIGEST_FIELD;
use crate::core::seal::META_SEAL_PHASE;
use crate::core::seal::MetaSeal;
use crate::core::seal::SealedBundle;
use crate::core::seal::SealedFile;
use crate::core::seal::SealedIntegrityReport;
use crate::core::time::Timestamp;
use crate::interfaces::ArtifactStore;
use crate::runtime::documents::parse_document;
use crate::runtime::documents::read_document;
use crate::runtime::documents::write_json_document;
use crate::runtime::error::ProofError;
use crate::runtime::verifier::ChainVerifier;
use crate::runtime::verifier::check_bundle_digest;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default gate identifier stamped on meta-seals.
pub const DEFAULT_SEAL_GATE: &str = "G16";

/// Seal rotator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    /// Governance gate identifier.
    pub gate: String,
    /// Run full member verification before sealing.
    pub verify_members: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            gate: DEFAULT_SEAL_GATE.to_string(),
            verify_members: true,
        }
    }
}

/// Input paths and cadence for one rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationInputs {
    /// Bundle path.
    pub bundle: String,
    /// Summary path.
    pub summary: String,
    /// Integrity report path.
    pub integrity_report: String,
    /// Cadence label (for example `daily`).
    pub cadence: String,
}

/// Summary fields consulted for the seal version label.
#[derive(Debug, Deserialize)]
struct SummaryHeader {
    /// Summary generation time.
    #[serde(default)]
    generated_at: Option<String>,
}

// ============================================================================
// SECTION: Rotator
// ============================================================================

/// Produces rotating meta-seals.
#[derive(Debug, Clone, Default)]
pub struct SealRotator {
    /// Rotation configuration.
    config: RotationConfig,
    /// Verifier used when member verification is enabled.
    verifier: ChainVerifier,
}

impl SealRotator {
    /// Creates a rotator with the given configuration.
    #[must_use]
    pub const fn new(config: RotationConfig) -> Self {
        Self {
            config,
            verifier: ChainVerifier::new(),
        }
    }

    /// Builds a meta-seal without writing it.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::IntegrityGateFailed`] when the integrity report did
    /// not pass, or another [`ProofError`] when an input is missing or invalid.
    pub fn rotate<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        inputs: &RotationInputs,
        rotated_at: Timestamp,
    ) -> Result<MetaSeal, ProofError> {
        let (gate, report_bytes): (IntegrityGate, _) =
            read_document(store, &inputs.integrity_report)?;
        if !gate.passed {
            tracing::warn!(
                target: "proof_chain.rotator",
                report = %inputs.integrity_report,
                "integrity gate failed; rotation refused"
            );
            return Err(ProofError::IntegrityGateFailed {
                path: inputs.integrity_report.clone(),
            });
        }

        let bundle_bytes = store.read(&inputs.bundle)?;
        let bundle: ProofBundle = parse_document(&inputs.bundle, &bundle_bytes)?;
        let bundle_file_sha = hash_bytes(&bundle_bytes);
        if self.config.verify_members {
            self.verifier.verify_manifest(
                store,
                &inputs.bundle,
                &bundle,
                bundle_file_sha.clone(),
            )?;
        } else {
            check_bundle_digest(&inputs.bundle, &bundle)?;
        }

        let summary_bytes = store.read(&inputs.summary)?;
        let summary: SummaryHeader = parse_document(&inputs.summary, &summary_bytes)?;
        let version = summary
            .generated_at
            .as_deref()
            .and_then(|text| Timestamp::parse(text).ok())
            .unwrap_or(rotated_at)
            .date_string();

        let mut seal = MetaSeal {
            version,
            phase: META_SEAL_PHASE.to_string(),
            gate: self.config.gate.clone(),
            cadence: inputs.cadence.clone(),
            rotated_at: rotated_at.to_string(),
            bundle: SealedBundle {
                path: inputs.bundle.clone(),
                sha256: bundle.bundle_sha256,
                file_sha256: bundle_file_sha,
            },
            summary: SealedFile {
                path: inputs.summary.clone(),
                sha256: hash_bytes(&summary_bytes),
            },
            integrity_report: SealedIntegrityReport {
                path: inputs.integrity_report.clone(),
                sha256: hash_bytes(&report_bytes),
                passed: gate.passed,
            },
            meta_hash: String::new(),
        };
        seal.meta_hash = self_digest(&seal, META_SEAL_DIGEST_FIELD)?;
        Ok(seal)
    }

    /// Builds a meta-seal and writes it to `out` once every check passed.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] when rotation or the write fails.
    pub fn rotate_to<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        inputs: &RotationInputs,
        rotated_at: Timestamp,
        out: &str,
    ) -> Result<MetaSeal, ProofError> {
        let seal = self.rotate(store, inputs, rotated_at)?;
        write_json_document(store, out, &seal)?;
        tracing::info!(
            target: "proof_chain.rotator",
            out = %out,
            cadence = %seal.cadence,
            meta_hash = %seal.meta_hash,
            "meta-seal rotated"
        );
        Ok(seal)
    }
}

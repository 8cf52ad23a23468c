// crates/proof-chain-core/src/runtime/certifier.rs
// ============================================================================
// Module: Certifier
// Description: Pre-certification sealing and meta-certification.
// Purpose: Turn a verified bundle into the terminal certificate gates key on.
// Dependencies: crate::{core, interfaces, runtime::verifier}, serde_json, tracing
// ============================================================================

//! ## Overview
//! Certification runs in two steps:
//! - [`Certifier::seal_bundle`] fingerprints a verified bundle digest.
//! - [`Certifier::certify`] re-verifies the bundle, cross-checks the
//!   pre-certification, enforces the freshness window, and emits the
//!   meta-certification.
//!
//! Freshness is checked pairwise across the earliest proof, latest proof,
//! bundle creation, and pre-certification times, and again as the overall
//! span. A single outlier fails the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use time::Duration;

use crate::core::certificate::BundleRef;
use crate::core::certificate::META_CERT_PHASE;
use crate::core::certificate::MetaCertBundleInput;
use crate::core::certificate::MetaCertInputs;
use crate::core::certificate::MetaCertLineage;
use crate::core::certificate::MetaCertPreCertInput;
use crate::core::certificate::MetaCertification;
use crate::core::certificate::PRE_CERT_PHASE;
use crate::core::certificate::PreCertification;
use crate::core::certificate::meta_hash;
use crate::core::certificate::seal_for;
use crate::core::hashing::hash_bytes;
use crate::core::hashing::hash_canonical_json;
use crate::core::time::Timestamp;
use crate::interfaces::ArtifactStore;
use crate::runtime::documents::normalize_artifact_path;
use crate::runtime::documents::parse_document;
use crate::runtime::documents::parse_timestamp;
use crate::runtime::error::ProofError;
use crate::runtime::verifier::ChainVerifier;
use crate::runtime::verifier::VerifiedBundle;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default freshness window in seconds.
pub const DEFAULT_WINDOW_SECONDS: u32 = 300;
/// Default release label stamped on meta-certifications.
pub const DEFAULT_CERT_VERSION: &str = "v17.0-alpha";
/// Default gate identifier stamped on meta-certifications.
pub const DEFAULT_CERT_GATE: &str = "G11";

/// Certifier configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertifierConfig {
    /// Maximum allowed distance between certification timestamps.
    pub window_seconds: u32,
    /// Release label.
    pub version: String,
    /// Governance gate identifier.
    pub gate: String,
}

impl Default for CertifierConfig {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW_SECONDS,
            version: DEFAULT_CERT_VERSION.to_string(),
            gate: DEFAULT_CERT_GATE.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Certifier
// ============================================================================

/// Produces pre-certifications and meta-certifications.
#[derive(Debug, Clone, Default)]
pub struct Certifier {
    /// Certifier configuration.
    config: CertifierConfig,
    /// Verifier used before every certification.
    verifier: ChainVerifier,
}

impl Certifier {
    /// Creates a certifier with the given configuration.
    #[must_use]
    pub const fn new(config: CertifierConfig) -> Self {
        Self {
            config,
            verifier: ChainVerifier::new(),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &CertifierConfig {
        &self.config
    }

    /// Seals an already-verified bundle digest.
    #[must_use]
    pub fn seal_bundle(
        &self,
        bundle_path: &str,
        bundle_sha256: &str,
        generated_at: Timestamp,
    ) -> PreCertification {
        PreCertification {
            phase: PRE_CERT_PHASE.to_string(),
            generated_at: generated_at.to_string(),
            bundle: BundleRef {
                path: bundle_path.to_string(),
                sha256: bundle_sha256.to_string(),
            },
            seal: seal_for(bundle_sha256),
        }
    }

    /// Verifies the bundle at `bundle_path` and seals it.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] when the bundle fails verification.
    pub fn pre_certify<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        bundle_path: &str,
        generated_at: Timestamp,
    ) -> Result<PreCertification, ProofError> {
        let verified = self.verifier.verify_bundle(store, bundle_path)?;
        let pre_cert = self.seal_bundle(bundle_path, &verified.bundle_sha256, generated_at);
        tracing::info!(
            target: "proof_chain.certifier",
            bundle = %bundle_path,
            seal = %pre_cert.seal,
            "bundle pre-certified"
        );
        Ok(pre_cert)
    }

    /// Cross-validates a bundle and its pre-certification and emits the meta-certification.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] on any verification, seal, or freshness failure.
    pub fn certify<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        bundle_path: &str,
        pre_cert_path: &str,
        generated_at: Timestamp,
    ) -> Result<MetaCertification, ProofError> {
        let verified = self.verifier.verify_bundle(store, bundle_path)?;

        let pre_cert_bytes = store.read(pre_cert_path)?;
        let pre_cert: PreCertification = parse_document(pre_cert_path, &pre_cert_bytes)?;
        let pre_cert_value: Value = parse_document(pre_cert_path, &pre_cert_bytes)?;
        check_pre_cert(&verified, &pre_cert)?;
        let pre_cert_time =
            parse_timestamp("pre-cert generated_at", Some(&pre_cert.generated_at))?;

        let span = self.check_window(&verified, pre_cert_time)?;

        let pre_cert_sha = hash_canonical_json(&pre_cert_value)?;
        let meta_hash = meta_hash(&verified.bundle_sha256, &pre_cert_sha, &verified.proofs)?;
        tracing::info!(
            target: "proof_chain.certifier",
            bundle = %bundle_path,
            pre_cert = %pre_cert_path,
            span_seconds = span.whole_seconds(),
            meta_hash = %meta_hash,
            "bundle meta-certified"
        );

        Ok(MetaCertification {
            version: self.config.version.clone(),
            phase: META_CERT_PHASE.to_string(),
            gate: self.config.gate.clone(),
            generated_at: generated_at.to_string(),
            inputs: MetaCertInputs {
                bundle: MetaCertBundleInput {
                    path: bundle_path.to_string(),
                    sha256: verified.bundle_sha256.clone(),
                    created_at: verified.created_at_text.clone(),
                },
                pre_cert: MetaCertPreCertInput {
                    path: pre_cert_path.to_string(),
                    sha256: pre_cert_sha,
                    file_sha256: hash_bytes(&pre_cert_bytes),
                    seal: pre_cert.seal,
                    generated_at: pre_cert.generated_at,
                },
            },
            lineage: MetaCertLineage {
                proofs: verified.proofs,
                phases: verified.phases,
                timestamp_window_seconds: span.whole_seconds(),
                window_seconds: i64::from(self.config.window_seconds),
                within_window: true,
            },
            meta_hash,
        })
    }

    /// Enforces the freshness window and returns the overall span.
    fn check_window(
        &self,
        verified: &VerifiedBundle,
        pre_cert_time: Timestamp,
    ) -> Result<Duration, ProofError> {
        let window = Duration::seconds(i64::from(self.config.window_seconds));
        let mut points = vec![("bundle_created_at".to_string(), verified.created_at)];
        if let Some(earliest) = verified.earliest_proof() {
            points.push((format!("earliest proof {}", earliest.name), earliest.generated_at));
        }
        if let Some(latest) = verified.latest_proof() {
            points.push((format!("latest proof {}", latest.name), latest.generated_at));
        }
        points.push(("pre-cert generated_at".to_string(), pre_cert_time));

        for (index, (first_label, first)) in points.iter().enumerate() {
            for (second_label, second) in points.iter().skip(index + 1) {
                let distance = first.distance(second);
                if distance > window {
                    return Err(self.window_error(first_label, second_label, distance));
                }
            }
        }

        let all = verified
            .timestamps
            .iter()
            .map(|proof| proof.generated_at)
            .chain([verified.created_at, pre_cert_time]);
        let (min, max) = all.fold((None, None), |(min, max), value| {
            (
                Some(min.map_or(value, |current: Timestamp| current.min(value))),
                Some(max.map_or(value, |current: Timestamp| current.max(value))),
            )
        });
        let span = match (min, max) {
            (Some(min), Some(max)) => max.distance(&min),
            _ => Duration::ZERO,
        };
        if span > window {
            return Err(self.window_error("earliest timestamp", "latest timestamp", span));
        }
        Ok(span)
    }

    /// Builds a window error for a labelled timestamp pair.
    fn window_error(&self, first: &str, second: &str, distance: Duration) -> ProofError {
        ProofError::TimestampWindowExceeded {
            first: first.to_string(),
            second: second.to_string(),
            distance_seconds: distance.whole_seconds(),
            window_seconds: i64::from(self.config.window_seconds),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Checks that a pre-certification references and seals the verified bundle.
fn check_pre_cert(
    verified: &VerifiedBundle,
    pre_cert: &PreCertification,
) -> Result<(), ProofError> {
    let expected_path = normalize_artifact_path(&verified.path);
    let actual_path = normalize_artifact_path(&pre_cert.bundle.path);
    if expected_path != actual_path {
        return Err(ProofError::PreCertBundleMismatch {
            field: "bundle.path".to_string(),
            expected: expected_path,
            actual: actual_path,
        });
    }
    let expected_seal = seal_for(&pre_cert.bundle.sha256);
    if expected_seal != pre_cert.seal {
        return Err(ProofError::SealMismatch {
            expected: expected_seal,
            actual: pre_cert.seal.clone(),
        });
    }
    if pre_cert.bundle.sha256 != verified.bundle_sha256 {
        return Err(ProofError::PreCertBundleMismatch {
            field: "bundle.sha256".to_string(),
            expected: verified.bundle_sha256.clone(),
            actual: pre_cert.bundle.sha256.clone(),
        });
    }
    Ok(())
}

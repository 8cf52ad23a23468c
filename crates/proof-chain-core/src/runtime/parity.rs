// crates/proof-chain-core/src/runtime/parity.rs
// ============================================================================
// Module: Cloud Parity Checker
// Description: Compares local artifact digests with a remote proof registry.
// Purpose: Derive the parity gate and trust index consumed by seal rotation.
// Dependencies: crate::{core, interfaces}, serde_json, tracing
// ============================================================================

//! ## Overview
//! Each tracked path is hashed locally and compared with the newest registry
//! row for the same tenant and filename. A failed registry query only marks
//! that entry as `error`; the batch always runs to completion.
//!
//! [`ParityChecker::publish`] is the reverse direction: it pushes local
//! digests into the registry so later checks have something to compare with.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::hashing::hash_bytes;
use crate::core::hashing::self_digest;
use crate::core::identifiers::TenantId;
use crate::core::parity::CloudParityReport;
use crate::core::parity::PARITY_DIGEST_FIELD;
use crate::core::parity::PARITY_PHASE;
use crate::core::parity::ParityCounters;
use crate::core::parity::ParityEntry;
use crate::core::parity::ParityStatus;
use crate::core::time::Timestamp;
use crate::interfaces::ArtifactError;
use crate::interfaces::ArtifactStore;
use crate::interfaces::ProofRegistry;
use crate::interfaces::RegistryKey;
use crate::interfaces::RegistryUpload;
use crate::runtime::documents::artifact_filename;
use crate::runtime::documents::parse_document;
use crate::runtime::error::ProofError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of a publish run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Paths whose digests were upserted.
    pub uploaded: Vec<String>,
    /// Paths skipped because the local file was absent.
    pub skipped: Vec<String>,
}

// ============================================================================
// SECTION: Checker
// ============================================================================

/// Cloud parity checker for one registry tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityChecker {
    /// Registry tenant.
    tenant_id: TenantId,
}

impl ParityChecker {
    /// Creates a checker scoped to `tenant_id`.
    #[must_use]
    pub const fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
        }
    }

    /// Compares each path in `files` with the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] when a path is rejected by the store or the
    /// report cannot be digested. Registry failures are recorded per entry.
    pub fn check<S, R>(
        &self,
        store: &S,
        registry: &R,
        files: &[String],
        generated_at: Timestamp,
    ) -> Result<CloudParityReport, ProofError>
    where
        S: ArtifactStore + ?Sized,
        R: ProofRegistry + ?Sized,
    {
        let mut counters = ParityCounters::default();
        let mut results = Vec::with_capacity(files.len());
        for path in files {
            let entry = self.check_one(store, registry, path)?;
            counters.record(entry.status);
            if entry.status != ParityStatus::Ok {
                tracing::warn!(
                    target: "proof_chain.parity",
                    path = %entry.path,
                    status = %entry.status,
                    "parity entry not ok"
                );
            }
            results.push(entry);
        }

        let mut report = CloudParityReport {
            phase: PARITY_PHASE.to_string(),
            generated_at: generated_at.to_string(),
            tenant_id: self.tenant_id.clone(),
            passed: counters.passed(),
            trust_index: counters.trust_index(),
            counters,
            results,
            sha256: String::new(),
        };
        report.sha256 = self_digest(&report, PARITY_DIGEST_FIELD)?;
        tracing::info!(
            target: "proof_chain.parity",
            tenant = %self.tenant_id,
            passed = report.passed,
            trust_index = report.trust_index,
            "parity checked"
        );
        Ok(report)
    }

    /// Upserts the digest and payload of each present file.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] when a file is not JSON or the registry rejects
    /// an upsert. The first registry failure aborts the run.
    pub fn publish<S, R>(
        &self,
        store: &S,
        registry: &R,
        files: &[String],
        uploaded_at: Timestamp,
    ) -> Result<PublishReport, ProofError>
    where
        S: ArtifactStore + ?Sized,
        R: ProofRegistry + ?Sized,
    {
        let mut report = PublishReport::default();
        for path in files {
            let bytes = match store.read(path) {
                Ok(bytes) => bytes,
                Err(ArtifactError::NotFound(_)) => {
                    tracing::warn!(
                        target: "proof_chain.parity",
                        path = %path,
                        "publish skipped missing file"
                    );
                    report.skipped.push(path.clone());
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let payload: Value = parse_document(path, &bytes)?;
            let upload = RegistryUpload {
                sha256: hash_bytes(&bytes),
                uploaded_at: uploaded_at.to_string(),
                payload,
            };
            registry.upsert(&self.key_for(path), &upload)?;
            tracing::info!(
                target: "proof_chain.parity",
                path = %path,
                sha256 = %upload.sha256,
                "digest published"
            );
            report.uploaded.push(path.clone());
        }
        Ok(report)
    }

    /// Classifies a single path.
    fn check_one<S, R>(
        &self,
        store: &S,
        registry: &R,
        path: &str,
    ) -> Result<ParityEntry, ProofError>
    where
        S: ArtifactStore + ?Sized,
        R: ProofRegistry + ?Sized,
    {
        let mut entry = ParityEntry {
            filename: artifact_filename(path),
            path: path.to_string(),
            status: ParityStatus::NotFound,
            local_sha: None,
            cloud_sha: None,
            issue: None,
        };
        let bytes = match store.read(path) {
            Ok(bytes) => bytes,
            Err(ArtifactError::NotFound(_)) => return Ok(entry),
            Err(err) => return Err(err.into()),
        };
        let local_sha = hash_bytes(&bytes);
        entry.local_sha = Some(local_sha.clone());

        entry.status = match registry.get_latest(&self.key_for(path)) {
            Err(err) => {
                entry.issue = Some(err.to_string());
                ParityStatus::Error
            }
            Ok(None) => ParityStatus::MissingSha,
            Ok(Some(record)) => {
                entry.cloud_sha = record.sha256;
                match entry.cloud_sha.as_deref() {
                    None | Some("") => ParityStatus::MissingSha,
                    Some(cloud) if cloud == local_sha => ParityStatus::Ok,
                    Some(_) => ParityStatus::Mismatch,
                }
            }
        };
        Ok(entry)
    }

    /// Builds the registry key for a tracked path.
    fn key_for(&self, path: &str) -> RegistryKey {
        RegistryKey {
            tenant_id: self.tenant_id.clone(),
            filename: artifact_filename(path),
        }
    }
}

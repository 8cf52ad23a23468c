// crates/proof-chain-core/tests/certifier.rs
// ============================================================================
// Module: Certifier Tests
// Description: Tests for pre-certification and meta-certification.
// ============================================================================
//! ## Overview
//! Validates seal cross-checks, pre-certification references, the freshness
//! window, and meta-hash determinism.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use proof_chain_core::ArtifactStore;
use proof_chain_core::Certifier;
use proof_chain_core::CertifierConfig;
use proof_chain_core::InMemoryArtifactStore;
use proof_chain_core::ProofError;
use proof_chain_core::hash_bytes;
use proof_chain_core::hash_canonical_json;
use proof_chain_core::meta_hash;
use proof_chain_core::seal_for;
use proof_chain_core::write_json_document;
use serde_json::json;

use crate::common::BUNDLE_PATH;
use crate::common::PRE_CERT_PATH;
use crate::common::put_json;
use crate::common::read_json;
use crate::common::seed_artifacts;
use crate::common::standard_chain;
use crate::common::ts;
use crate::common::write_bundle;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn pre_certify(store: &InMemoryArtifactStore, at: &str) {
    let pre_cert = Certifier::default().pre_certify(store, BUNDLE_PATH, ts(at)).unwrap();
    write_json_document(store, PRE_CERT_PATH, &pre_cert).unwrap();
}

fn certify(
    store: &InMemoryArtifactStore,
) -> Result<proof_chain_core::MetaCertification, ProofError> {
    Certifier::default().certify(store, BUNDLE_PATH, PRE_CERT_PATH, ts("2025-01-01T00:05:00Z"))
}

fn spread_chain(later_proof_at: &str, bundle_at: &str) -> InMemoryArtifactStore {
    let store = InMemoryArtifactStore::new();
    seed_artifacts(
        &store,
        &[("proof/a.json", "G9", "2025-01-01T00:00:00Z"), ("proof/b.json", "G9", later_proof_at)],
    );
    write_bundle(&store, &["proof/a.json", "proof/b.json"], bundle_at);
    store
}

// ============================================================================
// SECTION: Pre-Certification
// ============================================================================

#[test]
fn seal_bundle_fingerprints_bundle_digest() {
    let certifier = Certifier::default();
    let pre_cert = certifier.seal_bundle(BUNDLE_PATH, "abc", ts("2025-01-01T00:00:00Z"));
    assert_eq!(pre_cert.phase, "pre-cert");
    assert_eq!(pre_cert.seal, seal_for("abc"));
    assert_eq!(pre_cert.bundle.sha256, "abc");
    assert_eq!(pre_cert.generated_at, "2025-01-01T00:00:00Z");
}

#[test]
fn pre_certify_refuses_tampered_bundle() {
    let store = standard_chain();
    store.insert("proof/latency.json", b"{}".to_vec()).unwrap();
    let result = Certifier::default().pre_certify(&store, BUNDLE_PATH, ts("2025-01-01T00:02:00Z"));
    assert!(matches!(result, Err(ProofError::HashMismatch { .. })));
}

// ============================================================================
// SECTION: Meta-Certification
// ============================================================================

#[test]
fn certify_emits_meta_certification() {
    let store = standard_chain();
    pre_certify(&store, "2025-01-01T00:02:00Z");

    let cert = certify(&store).unwrap();
    let bundle = read_json(&store, BUNDLE_PATH);
    let pre_cert_value = read_json(&store, PRE_CERT_PATH);
    let pre_cert_sha = hash_canonical_json(&pre_cert_value).unwrap();

    assert_eq!(cert.phase, "meta-cert");
    assert_eq!(cert.version, "v17.0-alpha");
    assert_eq!(cert.gate, "G11");
    assert_eq!(cert.inputs.bundle.sha256, bundle["bundle_sha256"].as_str().unwrap());
    assert_eq!(cert.inputs.pre_cert.sha256, pre_cert_sha);
    assert_eq!(
        cert.inputs.pre_cert.file_sha256,
        hash_bytes(&store.read(PRE_CERT_PATH).unwrap())
    );
    assert_eq!(cert.lineage.timestamp_window_seconds, 120);
    assert_eq!(cert.lineage.window_seconds, 300);
    assert!(cert.lineage.within_window);
    assert_eq!(
        cert.meta_hash,
        meta_hash(&cert.inputs.bundle.sha256, &pre_cert_sha, &cert.lineage.proofs).unwrap()
    );
}

#[test]
fn certify_is_deterministic() {
    let store = standard_chain();
    pre_certify(&store, "2025-01-01T00:02:00Z");
    assert_eq!(certify(&store).unwrap(), certify(&store).unwrap());
}

#[test]
fn tampered_pre_cert_digest_fails_seal_check() {
    let store = standard_chain();
    pre_certify(&store, "2025-01-01T00:02:00Z");
    let mut pre_cert = read_json(&store, PRE_CERT_PATH);
    pre_cert["bundle"]["sha256"] = json!("f".repeat(64));
    put_json(&store, PRE_CERT_PATH, &pre_cert);

    assert!(matches!(certify(&store), Err(ProofError::SealMismatch { .. })));
}

#[test]
fn tampered_seal_fails_seal_check() {
    let store = standard_chain();
    pre_certify(&store, "2025-01-01T00:02:00Z");
    let mut pre_cert = read_json(&store, PRE_CERT_PATH);
    pre_cert["seal"] = json!("0".repeat(64));
    put_json(&store, PRE_CERT_PATH, &pre_cert);

    assert!(matches!(certify(&store), Err(ProofError::SealMismatch { .. })));
}

#[test]
fn pre_cert_for_other_bundle_is_rejected() {
    let store = standard_chain();
    pre_certify(&store, "2025-01-01T00:02:00Z");
    let other = "e".repeat(64);
    let mut pre_cert = read_json(&store, PRE_CERT_PATH);
    pre_cert["bundle"]["sha256"] = json!(other);
    pre_cert["seal"] = json!(seal_for(&other));
    put_json(&store, PRE_CERT_PATH, &pre_cert);

    let err = certify(&store).unwrap_err();
    assert!(matches!(
        err,
        ProofError::PreCertBundleMismatch { field, .. } if field == "bundle.sha256"
    ));
}

#[test]
fn pre_cert_path_comparison_ignores_dot_components() {
    let store = standard_chain();
    pre_certify(&store, "2025-01-01T00:02:00Z");
    let mut pre_cert = read_json(&store, PRE_CERT_PATH);
    pre_cert["bundle"]["path"] = json!("./proof/bundle.json");
    put_json(&store, PRE_CERT_PATH, &pre_cert);
    assert!(certify(&store).is_ok());

    pre_cert["bundle"]["path"] = json!("proof/other.json");
    put_json(&store, PRE_CERT_PATH, &pre_cert);
    let err = certify(&store).unwrap_err();
    assert!(matches!(
        err,
        ProofError::PreCertBundleMismatch { field, .. } if field == "bundle.path"
    ));
}

// ============================================================================
// SECTION: Freshness Window
// ============================================================================

#[test]
fn proofs_ten_minutes_apart_exceed_window() {
    let store = spread_chain("2025-01-01T00:10:00Z", "2025-01-01T00:10:30Z");
    pre_certify(&store, "2025-01-01T00:11:00Z");
    let err = certify(&store).unwrap_err();
    match err {
        ProofError::TimestampWindowExceeded {
            distance_seconds,
            window_seconds,
            ..
        } => {
            assert!(distance_seconds > window_seconds);
            assert_eq!(window_seconds, 300);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn proofs_four_minutes_apart_certify() {
    let store = spread_chain("2025-01-01T00:04:00Z", "2025-01-01T00:04:10Z");
    pre_certify(&store, "2025-01-01T00:04:20Z");
    let cert = certify(&store).unwrap();
    assert_eq!(cert.lineage.timestamp_window_seconds, 260);
}

#[test]
fn late_pre_cert_is_an_outlier() {
    let store = standard_chain();
    pre_certify(&store, "2025-01-01T00:09:00Z");
    let err = certify(&store).unwrap_err();
    assert!(matches!(
        err,
        ProofError::TimestampWindowExceeded { second, .. } if second == "pre-cert generated_at"
    ));
}

#[test]
fn configured_window_is_honored() {
    let store = spread_chain("2025-01-01T00:04:00Z", "2025-01-01T00:04:10Z");
    pre_certify(&store, "2025-01-01T00:04:20Z");
    let strict = Certifier::new(CertifierConfig {
        window_seconds: 60,
        ..CertifierConfig::default()
    });
    let result = strict.certify(&store, BUNDLE_PATH, PRE_CERT_PATH, ts("2025-01-01T00:05:00Z"));
    assert!(matches!(result, Err(ProofError::TimestampWindowExceeded { window_seconds: 60, .. })));
}

#[test]
fn unparseable_proof_timestamp_is_rejected() {
    let store = InMemoryArtifactStore::new();
    seed_artifacts(&store, &[("proof/a.json", "G9", "yesterday")]);
    write_bundle(&store, &["proof/a.json"], "2025-01-01T00:00:00Z");
    let result = Certifier::default().pre_certify(&store, BUNDLE_PATH, ts("2025-01-01T00:00:10Z"));
    assert!(matches!(
        result,
        Err(ProofError::InvalidTimestamp { value, .. }) if value == "yesterday"
    ));
}

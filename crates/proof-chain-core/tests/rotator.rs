// crates/proof-chain-core/tests/rotator.rs
// ============================================================================
// Module: Seal Rotator Tests
// Description: Tests for gated meta-seal rotation.
// ============================================================================
//! ## Overview
//! Validates the integrity gate, the no-partial-write rule, and meta-hash
//! determinism across rotations.

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
use proof_chain_core::InMemoryArtifactStore;
use proof_chain_core::ProofError;
use proof_chain_core::RotationConfig;
use proof_chain_core::RotationInputs;
use proof_chain_core::SealRotator;
use proof_chain_core::hash_bytes;
use proof_chain_core::self_digest;
use serde_json::json;

use crate::common::BUNDLE_PATH;
use crate::common::put_json;
use crate::common::read_json;
use crate::common::standard_chain;
use crate::common::ts;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const SUMMARY_PATH: &str = "proof/summary.json";
const REPORT_PATH: &str = "proof/integrity.json";
const SEAL_PATH: &str = "proof/meta_seal.json";

fn inputs() -> RotationInputs {
    RotationInputs {
        bundle: BUNDLE_PATH.to_string(),
        summary: SUMMARY_PATH.to_string(),
        integrity_report: REPORT_PATH.to_string(),
        cadence: "daily".to_string(),
    }
}

fn rotation_store(passed: bool) -> InMemoryArtifactStore {
    let store = standard_chain();
    put_json(&store, SUMMARY_PATH, &json!({"generated_at": "2025-01-01T00:02:00Z", "proofs": 3}));
    put_json(&store, REPORT_PATH, &json!({"passed": passed, "trust_index": 100.0}));
    store
}

// ============================================================================
// SECTION: Gate
// ============================================================================

#[test]
fn failed_integrity_report_blocks_rotation_and_writes_nothing() {
    let store = rotation_store(false);
    let result =
        SealRotator::default().rotate_to(&store, &inputs(), ts("2025-01-02T00:00:00Z"), SEAL_PATH);
    assert!(matches!(result, Err(ProofError::IntegrityGateFailed { path }) if path == REPORT_PATH));
    assert!(!store.exists(SEAL_PATH).unwrap());
}

#[test]
fn report_without_passed_flag_blocks_rotation() {
    let store = rotation_store(true);
    put_json(&store, REPORT_PATH, &json!({"trust_index": 100.0}));
    let result = SealRotator::default().rotate(&store, &inputs(), ts("2025-01-02T00:00:00Z"));
    assert!(matches!(result, Err(ProofError::IntegrityGateFailed { .. })));
}

#[test]
fn missing_integrity_report_is_missing_input() {
    let store = standard_chain();
    let result = SealRotator::default().rotate(&store, &inputs(), ts("2025-01-02T00:00:00Z"));
    assert!(matches!(result, Err(ProofError::ArtifactMissing { path }) if path == REPORT_PATH));
}

// ============================================================================
// SECTION: Rotation
// ============================================================================

#[test]
fn rotation_binds_all_three_digests() {
    let store = rotation_store(true);
    let seal = SealRotator::default()
        .rotate_to(&store, &inputs(), ts("2025-01-02T00:00:00Z"), SEAL_PATH)
        .unwrap();

    assert_eq!(seal.version, "2025-01-01");
    assert_eq!(seal.phase, "meta_seal_rotation");
    assert_eq!(seal.gate, "G16");
    assert_eq!(seal.cadence, "daily");
    assert_eq!(seal.bundle.file_sha256, hash_bytes(&store.read(BUNDLE_PATH).unwrap()));
    assert_eq!(seal.summary.sha256, hash_bytes(&store.read(SUMMARY_PATH).unwrap()));
    assert_eq!(seal.integrity_report.sha256, hash_bytes(&store.read(REPORT_PATH).unwrap()));
    assert!(seal.integrity_report.passed);

    let written = read_json(&store, SEAL_PATH);
    assert_eq!(written["meta_hash"].as_str().unwrap(), seal.meta_hash);
    assert_eq!(self_digest(&written, "meta_hash").unwrap(), seal.meta_hash);
}

#[test]
fn identical_inputs_give_identical_meta_hash() {
    let store = rotation_store(true);
    let rotator = SealRotator::default();
    let first = rotator.rotate(&store, &inputs(), ts("2025-01-02T00:00:00Z")).unwrap();
    let second = rotator.rotate(&store, &inputs(), ts("2025-01-02T00:00:00Z")).unwrap();
    assert_eq!(first.meta_hash, second.meta_hash);

    let later = rotator.rotate(&store, &inputs(), ts("2025-01-03T00:00:00Z")).unwrap();
    assert_ne!(first.meta_hash, later.meta_hash);
}

#[test]
fn summary_without_time_uses_rotation_date() {
    let store = rotation_store(true);
    put_json(&store, SUMMARY_PATH, &json!({"proofs": 3}));
    let seal =
        SealRotator::default().rotate(&store, &inputs(), ts("2025-03-04T05:06:07Z")).unwrap();
    assert_eq!(seal.version, "2025-03-04");
}

#[test]
fn tampered_member_blocks_rotation_unless_members_skipped() {
    let store = rotation_store(true);
    store.insert("proof/replay.json", b"{\"tampered\": true}".to_vec()).unwrap();

    let strict = SealRotator::default().rotate(&store, &inputs(), ts("2025-01-02T00:00:00Z"));
    assert!(matches!(strict, Err(ProofError::HashMismatch { .. })));

    let lenient = SealRotator::new(RotationConfig {
        verify_members: false,
        ..RotationConfig::default()
    });
    assert!(lenient.rotate(&store, &inputs(), ts("2025-01-02T00:00:00Z")).is_ok());
}

#[test]
fn edited_bundle_digest_blocks_rotation_even_without_member_checks() {
    let store = rotation_store(true);
    let mut bundle = read_json(&store, BUNDLE_PATH);
    bundle["bundle_sha256"] = json!("1".repeat(64));
    put_json(&store, BUNDLE_PATH, &bundle);

    let lenient = SealRotator::new(RotationConfig {
        verify_members: false,
        ..RotationConfig::default()
    });
    let result = lenient.rotate(&store, &inputs(), ts("2025-01-02T00:00:00Z"));
    assert!(matches!(result, Err(ProofError::BundleDigestMismatch { .. })));
}

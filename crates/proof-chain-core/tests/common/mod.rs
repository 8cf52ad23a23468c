// crates/proof-chain-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared fixtures for proof-chain core tests.
// Purpose: Build deterministic artifact stores and bundles from literal inputs.
// Dependencies: proof-chain-core, serde_json
// ============================================================================

//! ## Overview
//! Fixtures use fixed literal timestamps and payloads so every digest in the
//! tests is reproducible.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use proof_chain_core::ArtifactStore;
use proof_chain_core::BundleBuilder;
use proof_chain_core::InMemoryArtifactStore;
use proof_chain_core::ProofBundle;
use proof_chain_core::Timestamp;
use proof_chain_core::write_json_document;
use serde_json::json;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Bundle path used by fixtures.
pub const BUNDLE_PATH: &str = "proof/bundle.json";
/// Pre-certification path used by fixtures.
pub const PRE_CERT_PATH: &str = "proof/pre_cert.json";

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Parses a literal timestamp.
#[must_use]
pub fn ts(text: &str) -> Timestamp {
    Timestamp::parse(text).unwrap()
}

/// Renders a proof artifact body.
#[must_use]
pub fn artifact_body(phase: &str, generated_at: &str, metric: u32) -> Vec<u8> {
    serde_json::to_vec_pretty(&json!({
        "phase": phase,
        "generated_at": generated_at,
        "metrics": { "delivery_rate": metric },
    }))
    .unwrap()
}

/// Stores one artifact per `(name, phase, generated_at)` triple.
pub fn seed_artifacts(store: &InMemoryArtifactStore, artifacts: &[(&str, &str, &str)]) {
    for (index, (name, phase, generated_at)) in artifacts.iter().enumerate() {
        let metric = u32::try_from(index).unwrap() + 90;
        store.insert(name, artifact_body(phase, generated_at, metric)).unwrap();
    }
}

/// Builds a bundle over `names` and writes it to [`BUNDLE_PATH`].
pub fn write_bundle(
    store: &InMemoryArtifactStore,
    names: &[&str],
    created_at: &str,
) -> ProofBundle {
    let names: Vec<String> = names.iter().map(ToString::to_string).collect();
    let bundle = BundleBuilder::new().build(store, &names, ts(created_at)).unwrap();
    write_json_document(store, BUNDLE_PATH, &bundle).unwrap();
    bundle
}

/// Standard three-proof chain generated within one minute.
pub fn standard_chain() -> InMemoryArtifactStore {
    let store = InMemoryArtifactStore::new();
    seed_artifacts(
        &store,
        &[
            ("proof/delivery.json", "G9", "2025-01-01T00:00:00Z"),
            ("proof/latency.json", "G10", "2025-01-01T00:00:30Z"),
            ("proof/replay.json", "G10", "2025-01-01T00:01:00Z"),
        ],
    );
    write_bundle(
        &store,
        &["proof/replay.json", "proof/delivery.json", "proof/latency.json"],
        "2025-01-01T00:01:30Z",
    );
    store
}

/// Reads a stored JSON document as a generic value.
pub fn read_json(store: &InMemoryArtifactStore, path: &str) -> serde_json::Value {
    serde_json::from_slice(&store.read(path).unwrap()).unwrap()
}

/// Writes a generic JSON value.
pub fn put_json(store: &InMemoryArtifactStore, path: &str, value: &serde_json::Value) {
    store.insert(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

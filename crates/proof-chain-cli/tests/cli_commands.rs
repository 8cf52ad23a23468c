// crates/proof-chain-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Runs the proof-chain binary end to end in temporary roots.
// Purpose: Validate exit codes, written documents, and failure messages.
// ============================================================================

//! ## Overview
//! Each test seeds a temporary directory with proof artifacts, drives the
//! compiled binary with a fixed `--now`, and inspects stdout, stderr, and the
//! documents left behind.

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

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;
use std::thread;

use proof_chain_core::hash_bytes;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn proof_chain(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_proof-chain"))
        .current_dir(root)
        .env_remove("PROOF_CHAIN_CONFIG")
        .env_remove("PROOF_CHAIN_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_json(root: &Path, path: &str, value: &Value) {
    let target = root.join(path);
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(target, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

fn read_json(root: &Path, path: &str) -> Value {
    serde_json::from_slice(&fs::read(root.join(path)).unwrap()).unwrap()
}

/// Seeds three proofs generated within one minute of each other.
fn seeded_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let proofs = [
        ("proof/delivery.json", "G9", "2025-01-01T00:00:00Z"),
        ("proof/latency.json", "G10", "2025-01-01T00:00:30Z"),
        ("proof/replay.json", "G10", "2025-01-01T00:01:00Z"),
    ];
    for (index, (path, phase, generated_at)) in proofs.iter().enumerate() {
        write_json(
            dir.path(),
            path,
            &json!({"phase": phase, "generated_at": generated_at, "metric": index}),
        );
    }
    dir
}

fn build_bundle(root: &Path) {
    let output = proof_chain(
        root,
        &[
            "--now",
            "2025-01-01T00:01:30Z",
            "bundle",
            "build",
            "proof/delivery.json",
            "proof/latency.json",
            "proof/replay.json",
        ],
    );
    assert!(output.status.success(), "bundle build failed: {}", stderr(&output));
}

// ============================================================================
// SECTION: Certification Flow
// ============================================================================

#[test]
fn bundle_precert_certify_flow_succeeds() {
    let dir = seeded_root();
    let root = dir.path();
    build_bundle(root);

    let verify = proof_chain(root, &["bundle", "verify"]);
    assert!(verify.status.success(), "{}", stderr(&verify));
    assert!(stdout(&verify).contains("3 proofs"));

    let precert = proof_chain(root, &["--now", "2025-01-01T00:02:00Z", "precert"]);
    assert!(precert.status.success(), "{}", stderr(&precert));

    let certify = proof_chain(root, &["--now", "2025-01-01T00:03:00Z", "certify"]);
    assert!(certify.status.success(), "{}", stderr(&certify));

    let meta = read_json(root, "proof/meta_cert.json");
    assert_eq!(meta["phase"], "meta-cert");
    assert_eq!(meta["lineage"]["timestamp_window_seconds"], 120);
    assert_eq!(meta["lineage"]["within_window"], true);
    let bundle = read_json(root, "proof/bundle.json");
    assert_eq!(meta["inputs"]["bundle"]["sha256"], bundle["bundle_sha256"]);
}

#[test]
fn tampered_artifact_fails_verification() {
    let dir = seeded_root();
    let root = dir.path();
    build_bundle(root);
    write_json(
        root,
        "proof/latency.json",
        &json!({"phase": "G10", "generated_at": "2025-01-01T00:00:30Z", "metric": 99}),
    );

    let verify = proof_chain(root, &["bundle", "verify"]);
    assert_eq!(verify.status.code(), Some(1));
    assert!(stderr(&verify).contains("proof/latency.json"));

    let precert = proof_chain(root, &["--now", "2025-01-01T00:02:00Z", "precert"]);
    assert_eq!(precert.status.code(), Some(1));
    assert!(!root.join("proof/pre_cert.json").exists());
}

#[test]
fn narrow_window_rejects_certification() {
    let dir = seeded_root();
    let root = dir.path();
    build_bundle(root);
    let precert = proof_chain(root, &["--now", "2025-01-01T00:02:00Z", "precert"]);
    assert!(precert.status.success(), "{}", stderr(&precert));

    let certify =
        proof_chain(root, &["--now", "2025-01-01T00:03:00Z", "certify", "--window", "60"]);
    assert_eq!(certify.status.code(), Some(1));
    assert!(stderr(&certify).contains("Certification failed"));
    assert!(!root.join("proof/meta_cert.json").exists());
}

// ============================================================================
// SECTION: Seal Rotation
// ============================================================================

#[test]
fn failed_integrity_gate_writes_no_seal() {
    let dir = seeded_root();
    let root = dir.path();
    build_bundle(root);
    write_json(root, "proof/summary.json", &json!({"generated_at": "2025-01-02T00:00:00Z"}));
    write_json(root, "proof/integrity_report.json", &json!({"passed": false}));

    let rotate = proof_chain(root, &["--now", "2025-01-02T01:00:00Z", "seal", "rotate"]);
    assert_eq!(rotate.status.code(), Some(1));
    assert!(!root.join("proof/meta_seal.json").exists());
}

#[test]
fn passed_integrity_gate_writes_seal() {
    let dir = seeded_root();
    let root = dir.path();
    build_bundle(root);
    write_json(root, "proof/summary.json", &json!({"generated_at": "2025-01-02T00:00:00Z"}));
    write_json(root, "proof/integrity_report.json", &json!({"passed": true}));

    let rotate = proof_chain(
        root,
        &["--now", "2025-01-02T01:00:00Z", "seal", "rotate", "--cadence", "weekly"],
    );
    assert!(rotate.status.success(), "{}", stderr(&rotate));
    let seal = read_json(root, "proof/meta_seal.json");
    assert_eq!(seal["phase"], "meta_seal_rotation");
    assert_eq!(seal["version"], "2025-01-02");
    assert_eq!(seal["cadence"], "weekly");
    assert_eq!(seal["gate"], "G16");
}

// ============================================================================
// SECTION: Receipts
// ============================================================================

#[test]
fn receipt_append_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for (now, id) in [("2025-01-01T00:00:00Z", "CR-001"), ("2025-01-01T00:05:00Z", "CR-002")] {
        let append = proof_chain(
            root,
            &[
                "--now",
                now,
                "receipt",
                "append",
                "--change-type",
                "repair",
                "--summary",
                "backfilled digest",
                "--diff-hash",
                &"ab".repeat(32),
                "--id",
                id,
            ],
        );
        assert!(append.status.success(), "{}", stderr(&append));
    }
    let validate = proof_chain(root, &["receipt", "validate"]);
    assert!(validate.status.success(), "{}", stderr(&validate));
    assert!(stdout(&validate).contains("2 receipts, last CR-002"));
}

#[test]
fn out_of_order_ledger_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for id in ["CR-002", "CR-001"] {
        let append = proof_chain(
            root,
            &[
                "--now",
                "2025-01-01T00:00:00Z",
                "receipt",
                "append",
                "--change-type",
                "repair",
                "--summary",
                "s",
                "--diff-hash",
                "d",
                "--id",
                id,
            ],
        );
        assert!(append.status.success(), "{}", stderr(&append));
    }
    let validate = proof_chain(root, &["receipt", "validate"]);
    assert_eq!(validate.status.code(), Some(1));
    assert!(stderr(&validate).contains("CR-001"));
}

// ============================================================================
// SECTION: Config
// ============================================================================

#[test]
fn config_validate_uses_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = proof_chain(dir.path(), &["config", "validate"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("built-in defaults"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = proof_chain(dir.path(), &["--config", "absent.toml", "config", "validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load config"));
}

// ============================================================================
// SECTION: Parity
// ============================================================================

#[test]
fn parity_check_without_registry_fails() {
    let dir = seeded_root();
    let output = proof_chain(
        dir.path(),
        &["parity", "check", "--tenant", "tenant-a", "proof/delivery.json"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("[registry]"));
}

#[test]
fn parity_check_against_matching_registry_passes() {
    let dir = seeded_root();
    let root = dir.path();
    let local_sha = hash_bytes(&fs::read(root.join("proof/delivery.json")).unwrap());

    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let body = json!([{"filename": "delivery.json", "sha256": local_sha}]).to_string();
    let handle = thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut ignored = String::new();
            let _ = request.as_reader().read_to_string(&mut ignored);
            let url = request.url().to_string();
            let _ = request.respond(Response::from_string(body));
            return url;
        }
        String::new()
    });

    fs::write(
        root.join("proof-chain.toml"),
        format!(
            "[parity]\ntenant_id = \"tenant-a\"\nfiles = [\"proof/delivery.json\"]\n\n\
             [registry]\nurl = \"http://{addr}/rest/v1\"\nallow_http = true\n"
        ),
    )
    .unwrap();

    let output = proof_chain(root, &["--now", "2025-01-01T01:00:00Z", "parity", "check"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("trust_index 100.00"));

    let url = handle.join().unwrap();
    assert!(url.contains("filename=eq.delivery.json"));
    let report = read_json(root, "proof/cloud_sync_verify.json");
    assert_eq!(report["passed"], true);
    assert_eq!(report["counters"]["ok"], 1);
}

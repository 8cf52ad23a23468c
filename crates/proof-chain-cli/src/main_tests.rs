// crates/proof-chain-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and input resolution.
// Purpose: Ensure flags, config fallbacks, and clock overrides behave.
// Dependencies: proof-chain-cli main helpers
// ============================================================================

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use clap::Parser;
use proof_chain_config::ProofChainConfig;

use super::Cli;
use super::Commands;
use super::resolve_files;
use super::resolve_now;
use super::resolve_tenant;

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn global_flags_follow_subcommands() {
    let cli = Cli::try_parse_from([
        "proof-chain",
        "certify",
        "--window",
        "600",
        "--root",
        "/tmp/run",
        "--now",
        "2025-01-01T00:00:00Z",
    ])
    .unwrap();
    assert_eq!(cli.root.to_str(), Some("/tmp/run"));
    assert_eq!(cli.now.as_deref(), Some("2025-01-01T00:00:00Z"));
    match cli.command {
        Some(Commands::Certify(command)) => assert_eq!(command.window, Some(600)),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn zero_window_is_rejected_by_parser() {
    assert!(Cli::try_parse_from(["proof-chain", "certify", "--window", "0"]).is_err());
    assert!(Cli::try_parse_from(["proof-chain", "certify", "--window", "86401"]).is_err());
}

#[test]
fn receipt_append_requires_fields() {
    assert!(Cli::try_parse_from(["proof-chain", "receipt", "append", "--summary", "s"]).is_err());
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

#[test]
fn explicit_now_is_used_verbatim() {
    let now = resolve_now(Some("2025-03-04T05:06:07Z")).unwrap();
    assert_eq!(now.to_string(), "2025-03-04T05:06:07Z");
}

#[test]
fn unparseable_now_is_rejected() {
    let err = resolve_now(Some("yesterday")).unwrap_err();
    assert!(err.to_string().contains("yesterday"));
}

#[test]
fn files_fall_back_to_config() {
    let mut config = ProofChainConfig::default();
    config.parity.files = vec!["proof/a.json".to_string()];
    assert_eq!(resolve_files(&config, Vec::new()).unwrap(), vec!["proof/a.json".to_string()]);
    let explicit = resolve_files(&config, vec!["proof/b.json".to_string()]).unwrap();
    assert_eq!(explicit, vec!["proof/b.json".to_string()]);
    assert!(resolve_files(&ProofChainConfig::default(), Vec::new()).is_err());
}

#[test]
fn tenant_flag_overrides_config() {
    let mut config = ProofChainConfig::default();
    assert!(resolve_tenant(&config, None).is_err());
    config.parity.tenant_id = Some("tenant-a".to_string());
    assert_eq!(resolve_tenant(&config, None).unwrap().as_str(), "tenant-a");
    assert_eq!(resolve_tenant(&config, Some("tenant-b".to_string())).unwrap().as_str(), "tenant-b");
    assert!(resolve_tenant(&config, Some("  ".to_string())).is_err());
}

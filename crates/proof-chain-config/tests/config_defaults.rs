//! Default resolution tests for proof-chain-config.
// crates/proof-chain-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Default Tests
// Description: Validate section defaults and derived component configs.
// Purpose: Ensure an empty or partial file yields the documented behavior.
// =============================================================================

mod common;

use proof_chain_config::ProofChainConfig;

use crate::common::TestResult;
use crate::common::config_from_toml;
use crate::common::minimal_config;

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let config = config_from_toml("").map_err(|err| err.to_string())?;
    if config != ProofChainConfig::default() {
        return Err("empty config should equal defaults".to_string());
    }
    if config.bundle.path != "proof/bundle.json" || config.bundle.pre_cert != "proof/pre_cert.json"
    {
        return Err("unexpected bundle defaults".to_string());
    }
    if config.certification.window_seconds != 300 {
        return Err("default window should be 300 seconds".to_string());
    }
    if config.rotation.gate != "G16" || !config.rotation.verify_members {
        return Err("unexpected rotation defaults".to_string());
    }
    if config.receipts.index != "proof/change_receipts/index.json" {
        return Err("unexpected receipt index default".to_string());
    }
    if config.registry.is_some() {
        return Err("registry should be absent by default".to_string());
    }
    Ok(())
}

#[test]
fn minimal_config_fills_registry_defaults() -> TestResult {
    let config = config_from_toml(minimal_config()).map_err(|err| err.to_string())?;
    let registry = config.registry.ok_or("registry missing")?;
    if registry.table != "proof_registry" {
        return Err(format!("unexpected table {}", registry.table));
    }
    if registry.api_key_env != "PROOF_CHAIN_REGISTRY_KEY" {
        return Err(format!("unexpected api key env {}", registry.api_key_env));
    }
    if registry.timeout_ms != 10_000 || registry.allow_http {
        return Err("unexpected registry transport defaults".to_string());
    }
    let tenant = config.parity.tenant().map_err(|err| err.to_string())?;
    if tenant.as_str() != "tenant-a" {
        return Err(format!("unexpected tenant {tenant}"));
    }
    Ok(())
}

#[test]
fn certifier_config_follows_certification_section() -> TestResult {
    let config = config_from_toml(
        r#"
[certification]
window_seconds = 600
version = "v2.1"
gate = "G15"
"#,
    )
    .map_err(|err| err.to_string())?;
    let certifier = config.certifier_config();
    if certifier.window_seconds != 600 || certifier.version != "v2.1" || certifier.gate != "G15" {
        return Err("certifier config did not follow file".to_string());
    }
    Ok(())
}

#[test]
fn rotation_config_follows_rotation_section() -> TestResult {
    let config = config_from_toml(
        r#"
[rotation]
gate = "G17"
verify_members = false
"#,
    )
    .map_err(|err| err.to_string())?;
    let rotation = config.rotation_config();
    if rotation.gate != "G17" || rotation.verify_members {
        return Err("rotation config did not follow file".to_string());
    }
    Ok(())
}

#[test]
fn tenant_is_required_for_parity() -> TestResult {
    let config = ProofChainConfig::default();
    match config.parity.tenant() {
        Err(err) if err.to_string().contains("parity.tenant_id") => Ok(()),
        Err(err) => Err(format!("unexpected error {err}")),
        Ok(_) => Err("tenant should be required".to_string()),
    }
}

#[test]
fn unset_api_key_env_yields_none() -> TestResult {
    let config = config_from_toml(
        r#"
[registry]
url = "https://registry.example.com"
api_key_env = "PROOF_CHAIN_TEST_KEY_THAT_IS_NEVER_SET"
"#,
    )
    .map_err(|err| err.to_string())?;
    let registry = config.registry.ok_or("registry missing")?;
    if registry.api_key().is_some() {
        return Err("api key should be absent".to_string());
    }
    Ok(())
}

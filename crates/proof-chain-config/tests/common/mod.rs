// crates/proof-chain-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for proof-chain-config tests.
// =============================================================================

#![allow(dead_code, reason = "Helpers are shared across test binaries.")]

use proof_chain_config::ConfigError;
use proof_chain_config::ProofChainConfig;

pub type TestResult = Result<(), String>;

/// Parses and validates a config from inline TOML.
pub fn config_from_toml(toml: &str) -> Result<ProofChainConfig, ConfigError> {
    let config: ProofChainConfig =
        toml::from_str(toml).map_err(|err| ConfigError::Parse(err.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Smallest config that enables every component.
pub fn minimal_config() -> &'static str {
    r#"
[bundle]
proofs = ["proof/delivery.json"]

[parity]
tenant_id = "tenant-a"
files = ["proof/meta_cert.json"]

[registry]
url = "https://registry.example.com/rest/v1"
"#
}

pub fn assert_invalid(result: Result<ProofChainConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

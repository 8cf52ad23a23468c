// crates/proof-chain-config/src/config.rs
// ============================================================================
// Module: Proof Chain Configuration
// Description: Configuration loading and validation for the proof-chain tools.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: proof-chain-core, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! An explicitly named file must exist; the default file is optional and its
//! absence yields the built-in defaults. Every loaded config is validated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use proof_chain_core::CertifierConfig;
use proof_chain_core::RotationConfig;
use proof_chain_core::TenantId;
use proof_chain_core::runtime::DEFAULT_CERT_GATE;
use proof_chain_core::runtime::DEFAULT_CERT_VERSION;
use proof_chain_core::runtime::DEFAULT_SEAL_GATE;
use proof_chain_core::runtime::DEFAULT_WINDOW_SECONDS;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "proof-chain.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PROOF_CHAIN_CONFIG";
/// Default environment variable holding the registry API key.
pub const DEFAULT_API_KEY_ENV: &str = "PROOF_CHAIN_REGISTRY_KEY";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Largest accepted freshness window (one day).
pub(crate) const MAX_WINDOW_SECONDS: u32 = 86_400;
/// Smallest accepted registry timeout.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Largest accepted registry timeout.
pub(crate) const MAX_TIMEOUT_MS: u64 = 60_000;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Proof-chain configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProofChainConfig {
    /// Bundle and certificate locations.
    #[serde(default)]
    pub bundle: BundleConfig,
    /// Certification settings.
    #[serde(default)]
    pub certification: CertificationConfig,
    /// Seal rotation settings.
    #[serde(default)]
    pub rotation: RotationSettings,
    /// Change receipt ledger settings.
    #[serde(default)]
    pub receipts: ReceiptsConfig,
    /// Cloud parity settings.
    #[serde(default)]
    pub parity: ParityConfig,
    /// Remote proof registry connection.
    #[serde(default)]
    pub registry: Option<RegistryConfig>,
    /// Path the config was loaded from, when any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ProofChainConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// Resolution order is `path`, then `PROOF_CHAIN_CONFIG`, then
    /// `proof-chain.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, required) = resolve_path(path)?;
        if !required && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let mut config = Self::from_file(&resolved)?;
        config.source = Some(resolved);
        Ok(config)
    }

    /// Loads and validates configuration from one file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bundle.validate()?;
        self.certification.validate()?;
        self.rotation.validate()?;
        self.receipts.validate()?;
        self.parity.validate()?;
        if let Some(registry) = &self.registry {
            registry.validate()?;
        }
        Ok(())
    }

    /// Returns the certifier configuration.
    #[must_use]
    pub fn certifier_config(&self) -> CertifierConfig {
        CertifierConfig {
            window_seconds: self.certification.window_seconds,
            version: self.certification.version.clone(),
            gate: self.certification.gate.clone(),
        }
    }

    /// Returns the seal rotator configuration.
    #[must_use]
    pub fn rotation_config(&self) -> RotationConfig {
        RotationConfig {
            gate: self.rotation.gate.clone(),
            verify_members: self.rotation.verify_members,
        }
    }
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Bundle and certificate locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// Bundle manifest path.
    #[serde(default = "default_bundle_path")]
    pub path: String,
    /// Pre-certification path.
    #[serde(default = "default_pre_cert_path")]
    pub pre_cert: String,
    /// Meta-certification path.
    #[serde(default = "default_meta_cert_path")]
    pub meta_cert: String,
    /// Default proof artifacts for `bundle build`.
    #[serde(default)]
    pub proofs: Vec<String>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            path: default_bundle_path(),
            pre_cert: default_pre_cert_path(),
            meta_cert: default_meta_cert_path(),
            proofs: Vec::new(),
        }
    }
}

impl BundleConfig {
    /// Validates bundle locations.
    fn validate(&self) -> Result<(), ConfigError> {
        require_path("bundle.path", &self.path)?;
        require_path("bundle.pre_cert", &self.pre_cert)?;
        require_path("bundle.meta_cert", &self.meta_cert)?;
        for proof in &self.proofs {
            require_path("bundle.proofs", proof)?;
        }
        Ok(())
    }
}

/// Certification settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificationConfig {
    /// Freshness window in seconds.
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u32,
    /// Release label.
    #[serde(default = "default_cert_version")]
    pub version: String,
    /// Governance gate identifier.
    #[serde(default = "default_cert_gate")]
    pub gate: String,
}

impl Default for CertificationConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            version: default_cert_version(),
            gate: default_cert_gate(),
        }
    }
}

impl CertificationConfig {
    /// Validates certification settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_window("certification.window_seconds", self.window_seconds)?;
        require_label("certification.version", &self.version)?;
        require_label("certification.gate", &self.gate)
    }
}

/// Seal rotation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotationSettings {
    /// Cadence label.
    #[serde(default = "default_cadence")]
    pub cadence: String,
    /// Governance gate identifier.
    #[serde(default = "default_seal_gate")]
    pub gate: String,
    /// Run full member verification before sealing.
    #[serde(default = "default_true")]
    pub verify_members: bool,
    /// Summary path.
    #[serde(default = "default_summary_path")]
    pub summary: String,
    /// Integrity report path.
    #[serde(default = "default_integrity_report_path")]
    pub integrity_report: String,
    /// Meta-seal output path.
    #[serde(default = "default_meta_seal_path")]
    pub out: String,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            cadence: default_cadence(),
            gate: default_seal_gate(),
            verify_members: true,
            summary: default_summary_path(),
            integrity_report: default_integrity_report_path(),
            out: default_meta_seal_path(),
        }
    }
}

impl RotationSettings {
    /// Validates rotation settings.
    fn validate(&self) -> Result<(), ConfigError> {
        require_label("rotation.cadence", &self.cadence)?;
        require_label("rotation.gate", &self.gate)?;
        require_path("rotation.summary", &self.summary)?;
        require_path("rotation.integrity_report", &self.integrity_report)?;
        require_path("rotation.out", &self.out)
    }
}

/// Change receipt ledger settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReceiptsConfig {
    /// Receipt index path.
    #[serde(default = "default_receipt_index_path")]
    pub index: String,
}

impl Default for ReceiptsConfig {
    fn default() -> Self {
        Self {
            index: default_receipt_index_path(),
        }
    }
}

impl ReceiptsConfig {
    /// Validates ledger settings.
    fn validate(&self) -> Result<(), ConfigError> {
        require_path("receipts.index", &self.index)
    }
}

/// Cloud parity settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParityConfig {
    /// Registry tenant.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Tracked artifact paths.
    #[serde(default)]
    pub files: Vec<String>,
    /// Parity report output path.
    #[serde(default = "default_parity_report_path")]
    pub report: String,
}

impl Default for ParityConfig {
    fn default() -> Self {
        Self {
            tenant_id: None,
            files: Vec::new(),
            report: default_parity_report_path(),
        }
    }
}

impl ParityConfig {
    /// Validates parity settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tenant) = &self.tenant_id {
            require_label("parity.tenant_id", tenant)?;
        }
        for file in &self.files {
            require_path("parity.files", file)?;
        }
        require_path("parity.report", &self.report)
    }

    /// Returns the configured tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no tenant is configured.
    pub fn tenant(&self) -> Result<TenantId, ConfigError> {
        self.tenant_id
            .as_deref()
            .map(TenantId::new)
            .ok_or_else(|| ConfigError::Invalid("parity.tenant_id must be set".to_string()))
    }
}

/// Remote proof registry connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Registry base URL.
    pub url: String,
    /// Table (or collection) holding proof rows.
    #[serde(default = "default_registry_table")]
    pub table: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Allow cleartext `http://` URLs.
    #[serde(default)]
    pub allow_http: bool,
}

impl RegistryConfig {
    /// Validates registry settings.
    fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.url)
            .map_err(|err| ConfigError::Invalid(format!("registry.url is invalid: {err}")))?;
        match url.scheme() {
            "https" => {}
            "http" if self.allow_http => {}
            "http" => {
                return Err(ConfigError::Invalid(
                    "registry.url uses http:// without registry.allow_http".to_string(),
                ));
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "registry.url scheme {other} is not supported"
                )));
            }
        }
        require_label("registry.table", &self.table)?;
        require_label("registry.api_key_env", &self.api_key_env)?;
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "registry.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }

    /// Reads the API key from the configured environment variable.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        env::var(&self.api_key_env).ok().filter(|value| !value.trim().is_empty())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path and whether it must exist.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    let (resolved, required) = if let Some(path) = path {
        (path.to_path_buf(), true)
    } else if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        (PathBuf::from(env_path), true)
    } else {
        (PathBuf::from(DEFAULT_CONFIG_NAME), false)
    };
    if resolved.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in resolved.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok((resolved, required))
}

/// Validates the freshness window bounds.
fn validate_window(field: &str, seconds: u32) -> Result<(), ConfigError> {
    if seconds == 0 || seconds > MAX_WINDOW_SECONDS {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between 1 and {MAX_WINDOW_SECONDS}"
        )));
    }
    Ok(())
}

/// Requires a non-blank label.
fn require_label(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    Ok(())
}

/// Requires a non-blank relative path without parent traversal.
fn require_path(field: &str, value: &str) -> Result<(), ConfigError> {
    require_label(field, value)?;
    if value.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max path length")));
    }
    if Path::new(value).is_absolute() || value.split(['/', '\\']).any(|part| part == "..") {
        return Err(ConfigError::Invalid(format!("{field} must be a relative path without '..'")));
    }
    Ok(())
}

/// Default bundle path.
fn default_bundle_path() -> String {
    "proof/bundle.json".to_string()
}

/// Default pre-certification path.
fn default_pre_cert_path() -> String {
    "proof/pre_cert.json".to_string()
}

/// Default meta-certification path.
fn default_meta_cert_path() -> String {
    "proof/meta_cert.json".to_string()
}

/// Default freshness window.
const fn default_window_seconds() -> u32 {
    DEFAULT_WINDOW_SECONDS
}

/// Default certification version label.
fn default_cert_version() -> String {
    DEFAULT_CERT_VERSION.to_string()
}

/// Default certification gate.
fn default_cert_gate() -> String {
    DEFAULT_CERT_GATE.to_string()
}

/// Default rotation cadence.
fn default_cadence() -> String {
    "daily".to_string()
}

/// Default meta-seal gate.
fn default_seal_gate() -> String {
    DEFAULT_SEAL_GATE.to_string()
}

/// Default boolean true.
const fn default_true() -> bool {
    true
}

/// Default summary path.
fn default_summary_path() -> String {
    "proof/summary.json".to_string()
}

/// Default integrity report path.
fn default_integrity_report_path() -> String {
    "proof/integrity_report.json".to_string()
}

/// Default meta-seal output path.
fn default_meta_seal_path() -> String {
    "proof/meta_seal.json".to_string()
}

/// Default receipt index path.
fn default_receipt_index_path() -> String {
    "proof/change_receipts/index.json".to_string()
}

/// Default parity report path.
fn default_parity_report_path() -> String {
    "proof/cloud_sync_verify.json".to_string()
}

/// Default registry table.
fn default_registry_table() -> String {
    "proof_registry".to_string()
}

/// Default API key environment variable.
fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

/// Default registry timeout.
const fn default_timeout_ms() -> u64 {
    10_000
}

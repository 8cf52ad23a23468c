// crates/proof-chain-registry-http/src/rest.rs
// ============================================================================
// Module: REST Proof Registry
// Description: Blocking HTTP client for the proof registry table.
// Purpose: Fetch the latest digest per key and upsert uploaded proofs.
// Dependencies: proof-chain-core, reqwest, serde, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! Each lookup is one bounded GET with equality filters, newest-first ordering,
//! and a limit of one. Each upload is one POST carrying a single-row array.
//! Redirects are never followed and response bodies are size-limited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use proof_chain_core::ProofRegistry;
use proof_chain_core::RegistryError;
use proof_chain_core::RegistryKey;
use proof_chain_core::RegistryRecord;
use proof_chain_core::RegistryUpload;
use proof_chain_core::hash_bytes;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::Response;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Columns requested on lookup.
const SELECT_COLUMNS: &str = "filename,sha256,uploaded_at";
/// Conflict target for merged upserts.
const ON_CONFLICT: &str = "tenant_id,filename,meta_hash";
/// Preference header requesting merge semantics.
const MERGE_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";
/// Longest response detail carried into an error message.
const MAX_ERROR_DETAIL: usize = 512;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the REST registry client.
///
/// # Invariants
/// - `base_url` uses `https://` unless `allow_http` is set.
/// - `max_response_bytes` bounds every response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRegistryConfig {
    /// Base URL of the REST API (for example `https://host/rest/v1`).
    pub base_url: String,
    /// Table holding proof rows.
    pub table: String,
    /// API key sent as `apikey` and bearer token.
    pub api_key: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Allow cleartext HTTP.
    pub allow_http: bool,
    /// Maximum response size in bytes.
    pub max_response_bytes: usize,
    /// User agent for outbound requests.
    pub user_agent: String,
}

impl RestRegistryConfig {
    /// Creates a config for `base_url` with default limits.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            table: "proof_registry".to_string(),
            api_key: None,
            timeout_ms: 10_000,
            allow_http: false,
            max_response_bytes: 256 * 1024,
            user_agent: "proof-chain/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Proof registry served by a REST table.
pub struct RestProofRegistry {
    /// Client configuration.
    config: RestRegistryConfig,
    /// Endpoint for the proof table.
    endpoint: Url,
    /// HTTP client.
    client: Client,
}

impl RestProofRegistry {
    /// Builds a registry client.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] when the URL is unusable or the
    /// HTTP client cannot be created.
    pub fn new(config: RestRegistryConfig) -> Result<Self, RegistryError> {
        let endpoint = table_endpoint(&config)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|err| RegistryError::Unavailable(format!("http client build failed: {err}")))?;
        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    /// Returns the resolved table endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Adds authentication headers when an API key is configured.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => {
                request.header("apikey", key).header(AUTHORIZATION, format!("Bearer {key}"))
            }
            None => request,
        }
    }

    /// Sends a request and returns the body of a successful response.
    fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, RegistryError> {
        let mut response = self
            .authorize(request)
            .send()
            .map_err(|err| RegistryError::Unavailable(format!("registry request failed: {err}")))?;
        let status = response.status();
        let body = read_response_limited(&mut response, self.config.max_response_bytes)?;
        if status.is_redirection() || status.is_client_error() || status.is_server_error() {
            return Err(RegistryError::Rejected {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }
        Ok(body)
    }
}

impl ProofRegistry for RestProofRegistry {
    fn get_latest(&self, key: &RegistryKey) -> Result<Option<RegistryRecord>, RegistryError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("tenant_id", &format!("eq.{}", key.tenant_id))
            .append_pair("filename", &format!("eq.{}", key.filename))
            .append_pair("select", SELECT_COLUMNS)
            .append_pair("order", "uploaded_at.desc")
            .append_pair("limit", "1");
        let body = self.send(self.client.get(url))?;
        let rows: Vec<RegistryRow> = serde_json::from_slice(&body)
            .map_err(|err| RegistryError::InvalidResponse(err.to_string()))?;
        let latest = rows.into_iter().next().map(|row| RegistryRecord {
            sha256: row.sha256,
            uploaded_at: row.uploaded_at,
        });
        tracing::debug!(
            target: "proof_chain.registry",
            filename = %key.filename,
            found = latest.is_some(),
            "registry lookup"
        );
        Ok(latest)
    }

    fn upsert(&self, key: &RegistryKey, upload: &RegistryUpload) -> Result<(), RegistryError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("on_conflict", ON_CONFLICT);
        let rows = [UpsertRow {
            tenant_id: key.tenant_id.as_str(),
            filename: &key.filename,
            meta_hash: row_meta_hash(&key.filename, &upload.sha256),
            sha256: &upload.sha256,
            uploaded_at: &upload.uploaded_at,
            proof_json: &upload.payload,
        }];
        let body = serde_json::to_vec(&rows).map_err(|err| {
            RegistryError::InvalidResponse(format!("row serialization failed: {err}"))
        })?;
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", MERGE_PREFERENCE)
            .body(body);
        self.send(request)?;
        tracing::info!(
            target: "proof_chain.registry",
            filename = %key.filename,
            sha256 = %upload.sha256,
            "registry upsert"
        );
        Ok(())
    }
}

// ============================================================================
// SECTION: Wire Rows
// ============================================================================

/// Row returned by a lookup.
#[derive(Debug, Deserialize)]
struct RegistryRow {
    /// Recorded digest.
    #[serde(default)]
    sha256: Option<String>,
    /// Upload time.
    #[serde(default)]
    uploaded_at: Option<String>,
}

/// Row sent on upsert.
#[derive(Debug, Serialize)]
struct UpsertRow<'a> {
    /// Tenant scope.
    tenant_id: &'a str,
    /// Artifact filename.
    filename: &'a str,
    /// Deduplication key.
    meta_hash: String,
    /// Raw-byte digest.
    sha256: &'a str,
    /// Upload time.
    uploaded_at: &'a str,
    /// Parsed artifact body.
    proof_json: &'a Value,
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the row deduplication key for a filename and digest.
#[must_use]
pub fn row_meta_hash(filename: &str, sha256: &str) -> String {
    hash_bytes(format!("{filename}::{sha256}").as_bytes())
}

/// Validates the base URL and appends the table segment.
fn table_endpoint(config: &RestRegistryConfig) -> Result<Url, RegistryError> {
    let mut url = Url::parse(&config.base_url)
        .map_err(|err| RegistryError::Unavailable(format!("invalid registry url: {err}")))?;
    match url.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        other => {
            return Err(RegistryError::Unavailable(format!(
                "registry url scheme {other} is not allowed"
            )));
        }
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(RegistryError::Unavailable(
            "registry url credentials are not allowed".to_string(),
        ));
    }
    if config.table.trim().is_empty() || config.table.contains('/') {
        return Err(RegistryError::Unavailable(format!(
            "invalid registry table: {}",
            config.table
        )));
    }
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|()| RegistryError::Unavailable("registry url cannot be a base".to_string()))?
        .pop_if_empty()
        .push(&config.table);
    Ok(url)
}

/// Renders a bounded error detail from a response body.
fn error_detail(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.len() <= MAX_ERROR_DETAIL {
        return trimmed.to_string();
    }
    let mut end = MAX_ERROR_DETAIL;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, RegistryError> {
    let max_bytes_u64 = u64::try_from(max_bytes).map_err(|_| {
        RegistryError::InvalidResponse("response size limit exceeds u64".to_string())
    })?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(oversized());
    }
    let mut buf = Vec::new();
    response
        .take(max_bytes_u64.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|err| RegistryError::Unavailable(format!("failed to read response: {err}")))?;
    if buf.len() > max_bytes {
        return Err(oversized());
    }
    Ok(buf)
}

/// Error for a response over the size limit.
fn oversized() -> RegistryError {
    RegistryError::InvalidResponse("registry response exceeds size limit".to_string())
}

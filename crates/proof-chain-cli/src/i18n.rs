// crates/proof-chain-cli/src/i18n.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings behind stable keys.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! Every line the `proof-chain` binary prints is looked up in a static catalog
//! through the [`t!`](crate::t) macro. Failure messages name the file, digest,
//! or timestamp pair involved so a reader can reproduce the check by hand.
//!
//! ## Invariants
//! - The catalog is built once and read-only thereafter.
//! - Missing keys fall back to the key itself.
//! - Placeholders are substituted in argument order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates.
    pub key: &'static str,
    /// The formatted value substituted for the placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Catalog entries.
pub(crate) const CATALOG_ITEMS: &[(&str, &str)] = &[
    ("main.version", "proof-chain {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid ({source})."),
    ("config.source.defaults", "built-in defaults"),
    ("time.now_invalid", "Invalid --now timestamp {value}: {error}"),
    ("store.root_invalid", "Invalid artifact root {path}: {error}"),
    ("bundle.build.empty", "No proofs given and bundle.proofs is empty."),
    ("bundle.build.ok", "Bundle written to {path}: {count} proofs, bundle_sha256 {sha256}"),
    ("bundle.build.failed", "Bundle build failed: {error}"),
    ("bundle.verify.ok", "Bundle {path} verified: {count} proofs, bundle_sha256 {sha256}"),
    ("bundle.verify.failed", "Bundle verification failed: {error}"),
    ("precert.ok", "Pre-certification written to {path} (seal {seal})"),
    ("precert.failed", "Pre-certification failed: {error}"),
    (
        "certify.ok",
        "Meta-certification written to {path}: meta_hash {meta_hash}, span {span}s within \
         {window}s",
    ),
    ("certify.failed", "Certification failed: {error}"),
    ("seal.rotate.ok", "Meta-seal written to {path}: meta_hash {meta_hash}"),
    ("seal.rotate.failed", "Seal rotation failed: {error}"),
    ("receipt.append.ok", "Receipt {id} appended to {path}"),
    ("receipt.append.failed", "Receipt append failed: {error}"),
    ("receipt.validate.ok", "Receipt ledger {path} valid: {count} receipts, last {last}"),
    ("receipt.validate.none", "none"),
    ("receipt.validate.failed", "Receipt ledger validation failed: {error}"),
    ("parity.registry_missing", "No [registry] section is configured."),
    ("parity.registry_failed", "Failed to open proof registry: {error}"),
    ("parity.tenant_missing", "No tenant given: pass --tenant or set parity.tenant_id."),
    ("parity.files_empty", "No files given and parity.files is empty."),
    ("parity.entry", "{status} {path}"),
    (
        "parity.check.summary",
        "Parity report written to {path}: trust_index {trust_index}, ok {ok}, mismatch \
         {mismatch}, missing_sha {missing_sha}, not_found {not_found}, errors {errors}",
    ),
    ("parity.check.not_passed", "Cloud parity did not pass."),
    ("parity.check.failed", "Parity check failed: {error}"),
    ("parity.push.uploaded", "Uploaded {path}"),
    ("parity.push.skipped", "Skipped missing proof {path}"),
    ("parity.push.ok", "Published {uploaded} proofs ({skipped} skipped)."),
    ("parity.push.failed", "Proof publish failed: {error}"),
];

/// Returns the message catalog.
pub(crate) fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CATALOG.get_or_init(|| CATALOG_ITEMS.iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Returns
///
/// A [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

// crates/proof-chain-core/src/runtime/documents.rs
// ============================================================================
// Module: Document Helpers
// Description: Typed JSON reads and writes through an artifact store.
// Purpose: Keep parse failures, paths, and timestamp fields in error reports.
// Dependencies: crate::{core, interfaces}, serde, serde_json
// ============================================================================

//! ## Overview
//! Shared helpers for reading, parsing, and writing proof documents.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::time::Timestamp;
use crate::interfaces::ArtifactStore;
use crate::runtime::error::ProofError;

// ============================================================================
// SECTION: Reads
// ============================================================================

/// Parses a JSON document, attributing failures to `path`.
pub(crate) fn parse_document<T: DeserializeOwned>(
    path: &str,
    bytes: &[u8],
) -> Result<T, ProofError> {
    serde_json::from_slice(bytes).map_err(|err| ProofError::Malformed {
        path: path.to_string(),
        reason: err.to_string(),
    })
}

/// Reads and parses a JSON document, returning it with its raw bytes.
pub(crate) fn read_document<S: ArtifactStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    path: &str,
) -> Result<(T, Vec<u8>), ProofError> {
    let bytes = store.read(path)?;
    let document = parse_document(path, &bytes)?;
    Ok((document, bytes))
}

/// Parses a required timestamp field.
pub(crate) fn parse_timestamp(field: &str, value: Option<&str>) -> Result<Timestamp, ProofError> {
    let text = value.unwrap_or_default();
    Timestamp::parse(text).map_err(|_| ProofError::InvalidTimestamp {
        field: field.to_string(),
        value: text.to_string(),
    })
}

// ============================================================================
// SECTION: Writes
// ============================================================================

/// Writes a document as pretty-printed JSON with a trailing newline.
///
/// # Errors
///
/// Returns [`ProofError`] when serialization or the store write fails.
pub fn write_json_document<S: ArtifactStore + ?Sized, T: Serialize>(
    store: &S,
    path: &str,
    document: &T,
) -> Result<(), ProofError> {
    let mut bytes = serde_json::to_vec_pretty(document)
        .map_err(|err| ProofError::Serialization(err.to_string()))?;
    bytes.push(b'\n');
    store.write(path, &bytes)?;
    Ok(())
}

/// Normalizes a relative artifact path by dropping empty and `.` components.
#[must_use]
pub fn normalize_artifact_path(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|component| !component.is_empty() && *component != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the final path component used as a registry filename.
#[must_use]
pub fn artifact_filename(path: &str) -> String {
    path.rsplit(['/', '\\']).find(|component| !component.is_empty()).unwrap_or(path).to_string()
}

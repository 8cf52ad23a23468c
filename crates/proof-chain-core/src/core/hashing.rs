// crates/proof-chain-core/src/core/hashing.rs
// ============================================================================
// Module: Proof Chain Canonical Hashing
// Description: Sorted-key JSON canonicalization and content digest utilities.
// Purpose: Provide deterministic digests for proof artifacts and certificates.
// Dependencies: serde, serde_json, sha2
// ============================================================================

//! ## Overview
//! Two hashing paths exist and are never conflated:
//! - [`hash_bytes`] digests raw artifact bytes exactly as stored.
//! - [`hash_canonical_json`] digests a structure after canonicalization, so
//!   key order and source whitespace never leak into the digest.
//!
//! Bundle digests, seals, and meta-hashes use the structure path; per-artifact
//! checks use the raw-byte path.
//!
//! ## Canonical Form
//! The canonical text is the one the existing proof pipeline hashes, so
//! digests produced here and there agree byte for byte:
//! - object keys sorted by code point, recursively;
//! - `", "` between items and `": "` between a key and its value;
//! - every character outside printable ASCII written as `\uXXXX` (UTF-16
//!   units, lowercase hex);
//! - floats in shortest round-trip form, with `e+XX`/`e-XX` exponents outside
//!   `1e-4 <= |x| < 1e16` and a trailing `.0` on integral values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::ser::Formatter;
use serde_json::ser::Serializer;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing canonical digests.
#[derive(Debug, Error)]
pub enum HashError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
    /// A self-digest was requested for a value that is not a JSON object.
    #[error("self digest requires a json object")]
    NotAnObject,
}

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Returns the canonical JSON bytes for a serializable value.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, HashError> {
    let value =
        serde_json::to_value(value).map_err(|err| HashError::Canonicalization(err.to_string()))?;
    let mut bytes = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut bytes, CanonicalFormatter);
    sort_keys(value)
        .serialize(&mut serializer)
        .map_err(|err| HashError::Canonicalization(err.to_string()))?;
    Ok(bytes)
}

/// Digests the canonical JSON form of a value.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn hash_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String, HashError> {
    let bytes = canonical_json_bytes(value)?;
    Ok(hash_bytes(&bytes))
}

/// Digests raw bytes with SHA-256 and returns lowercase hex.
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex_encode(&hasher.finalize())
}

/// Digests the canonical form of a JSON object with `field` removed.
///
/// Emitted documents carry a terminal digest computed over every other field;
/// this is the single place that rule is implemented.
///
/// # Errors
///
/// Returns [`HashError`] when the value is not an object or cannot be
/// canonicalized.
pub fn self_digest<T: Serialize + ?Sized>(value: &T, field: &str) -> Result<String, HashError> {
    let mut json =
        serde_json::to_value(value).map_err(|err| HashError::Canonicalization(err.to_string()))?;
    let Value::Object(map) = &mut json else {
        return Err(HashError::NotAnObject);
    };
    map.remove(field);
    hash_canonical_json(&json)
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

// ============================================================================
// SECTION: Canonical Form
// ============================================================================

/// Rebuilds a value with every object's keys in code point order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|left, right| left.0.cmp(&right.0));
            let mut sorted = Map::new();
            for (key, value) in entries {
                sorted.insert(key, sort_keys(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// JSON formatter producing the canonical text.
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0_u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                let mut buf = [0_u8; 1];
                writer.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    writer.write_all(format!("\\u{unit:04x}").as_bytes())?;
                }
            }
        }
        Ok(())
    }

    fn write_f64<W: ?Sized + Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(format_float(value).as_bytes())
    }
}

/// Renders a float in shortest round-trip form with the canonical exponent rules.
fn format_float(value: f64) -> String {
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };
    let (sign, mantissa) = mantissa.strip_prefix('-').map_or(("", mantissa), |rest| ("-", rest));
    if !(-4..16).contains(&exponent) {
        let exponent_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{mantissa}e{exponent_sign}{:02}", exponent.unsigned_abs());
    }
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let shift = usize::try_from(exponent.unsigned_abs()).unwrap_or_default();
    if exponent < 0 {
        let zeros = "0".repeat(shift.saturating_sub(1));
        return format!("{sign}0.{zeros}{digits}");
    }
    let point = shift + 1;
    if digits.len() <= point {
        let zeros = "0".repeat(point - digits.len());
        format!("{sign}{digits}{zeros}.0")
    } else {
        format!("{sign}{}.{}", &digits[..point], &digits[point..])
    }
}

// crates/proof-chain-core/src/core/identifiers.rs
// ============================================================================
// Module: Proof Chain Identifiers
// Description: Opaque identifiers for registry tenants and change receipts.
// Purpose: Provide strongly typed, serializable identifiers with stable wire forms.
// Dependencies: serde, ulid
// ============================================================================

//! ## Overview
//! Identifiers serialize as plain strings. [`ReceiptId`] ordering is plain
//! string ordering, which is what the receipt ledger's monotonicity rule uses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use ulid::Ulid;

use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Tenant identifier used to scope remote registry rows.
///
/// # Invariants
/// - Opaque UTF-8 string; no normalization or validation is applied by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a new tenant identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Change receipt identifier.
///
/// # Invariants
/// - Compared as a plain string; generated ids sort by issue time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Prefix used for generated receipt identifiers.
    pub const PREFIX: &'static str = "CR-";

    /// Creates a receipt identifier from caller-supplied text.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a time-ordered, lexically sortable identifier for `issued_at`.
    ///
    /// The random tail only orders ids from different milliseconds; use
    /// [`ReceiptId::generate_after`] when appending to an existing ledger.
    #[must_use]
    pub fn generate(issued_at: &Timestamp) -> Self {
        Self::from_ulid(Ulid::from_datetime(issued_at.to_system_time()))
    }

    /// Generates an identifier for `issued_at` that sorts after `previous`.
    ///
    /// When `previous` is a generated id from the same or a later millisecond
    /// the new id is its successor, so ids issued together stay ordered.
    #[must_use]
    pub fn generate_after(issued_at: &Timestamp, previous: Option<&Self>) -> Self {
        let candidate = Ulid::from_datetime(issued_at.to_system_time());
        let Some(last) = previous.and_then(Self::ulid) else {
            return Self::from_ulid(candidate);
        };
        if candidate > last {
            return Self::from_ulid(candidate);
        }
        let next = last
            .increment()
            .unwrap_or_else(|| Ulid::from_parts(last.timestamp_ms().saturating_add(1), 0));
        Self::from_ulid(next)
    }

    /// Returns the ULID of a generated identifier.
    #[must_use]
    pub fn ulid(&self) -> Option<Ulid> {
        self.0.strip_prefix(Self::PREFIX).and_then(|tail| Ulid::from_string(tail).ok())
    }

    /// Wraps a ULID in the generated form.
    fn from_ulid(ulid: Ulid) -> Self {
        Self(format!("{}{ulid}", Self::PREFIX))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

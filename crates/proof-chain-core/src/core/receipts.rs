// crates/proof-chain-core/src/core/receipts.rs
// ============================================================================
// Module: Change Receipt Records
// Description: Change receipt and receipt index schemas.
// Purpose: Record manual repairs and backfills as an ordered audit trail.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Receipts are appended in ledger order. The index is only trustworthy when
//! receipt ids, taken in that order, never decrease under string comparison.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ReceiptId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Field excluded from the receipt index self digest.
pub const RECEIPT_INDEX_DIGEST_FIELD: &str = "sha256";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit record of one manual corrective action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReceipt {
    /// Receipt identifier.
    pub receipt_id: ReceiptId,
    /// Issue time.
    pub issued_at: String,
    /// Change category (for example `repair` or `backfill`).
    pub change_type: String,
    /// Human-readable summary.
    pub summary: String,
    /// Digest of the associated diff or proof.
    pub diff_hash: String,
}

/// Append-only receipt index.
///
/// # Invariants
/// - `last_receipt_id` is the id of the final receipt when any exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReceiptIndex {
    /// Receipts in ledger order.
    #[serde(default)]
    pub receipts: Vec<ChangeReceipt>,
    /// Id of the most recently appended receipt.
    #[serde(default)]
    pub last_receipt_id: Option<ReceiptId>,
    /// Whether automatic tuning is suspended while manual changes are audited.
    #[serde(default = "default_guard")]
    pub autotune_guard_active: bool,
    /// Time the index was last written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Canonical digest over every other field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Default for the autotune guard on new indices.
const fn default_guard() -> bool {
    true
}

impl Default for ChangeReceiptIndex {
    fn default() -> Self {
        Self {
            receipts: Vec::new(),
            last_receipt_id: None,
            autotune_guard_active: default_guard(),
            generated_at: None,
            sha256: None,
        }
    }
}

impl ChangeReceiptIndex {
    /// Returns the first ordering violation as `(position, previous, current)`.
    #[must_use]
    pub fn first_ordering_violation(&self) -> Option<(usize, &ReceiptId, &ReceiptId)> {
        self.receipts.windows(2).enumerate().find_map(|(index, pair)| {
            let (previous, current) = (&pair[0].receipt_id, &pair[1].receipt_id);
            (current < previous).then_some((index + 1, previous, current))
        })
    }

    /// Returns true when receipt ids never decrease in ledger order.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.first_ordering_violation().is_none()
    }
}

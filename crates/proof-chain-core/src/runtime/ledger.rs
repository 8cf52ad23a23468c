// crates/proof-chain-core/src/runtime/ledger.rs
// ============================================================================
// Module: Change Receipt Ledger
// Description: Append-only receipt index with ordering validation.
// Purpose: Keep an auditable trail of manual repairs and backfills.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! The ledger lives in one index document. Appends always land (the ledger is
//! an audit trail), but an append that breaks id ordering is logged and
//! [`ReceiptLedger::validate`] then rejects the index.
//!
//! A missing index reads as empty. A malformed index is a hard failure and is
//! never reset.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::hashing::self_digest;
use crate::core::identifiers::ReceiptId;
use crate::core::receipts::ChangeReceipt;
use crate::core::receipts::ChangeReceiptIndex;
use crate::core::receipts::RECEIPT_INDEX_DIGEST_FIELD;
use crate::core::time::Timestamp;
use crate::interfaces::ArtifactError;
use crate::interfaces::ArtifactStore;
use crate::runtime::documents::parse_document;
use crate::runtime::documents::write_json_document;
use crate::runtime::error::ProofError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Receipt to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRequest {
    /// Change category.
    pub change_type: String,
    /// Human-readable summary.
    pub summary: String,
    /// Digest of the associated diff or proof.
    pub diff_hash: String,
    /// Caller-supplied id; generated from the issue time when absent.
    pub receipt_id: Option<ReceiptId>,
}

/// Outcome of a successful ledger validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerValidation {
    /// Number of receipts checked.
    pub receipts: usize,
    /// Id of the final receipt.
    pub last_receipt_id: Option<ReceiptId>,
}

// ============================================================================
// SECTION: Ledger
// ============================================================================

/// Receipt ledger backed by one index document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLedger {
    /// Index document path.
    index_path: String,
}

impl ReceiptLedger {
    /// Creates a ledger over the index at `index_path`.
    #[must_use]
    pub fn new(index_path: impl Into<String>) -> Self {
        Self {
            index_path: index_path.into(),
        }
    }

    /// Returns the index path.
    #[must_use]
    pub fn index_path(&self) -> &str {
        &self.index_path
    }

    /// Loads the index, or an empty one when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::Malformed`] when the index cannot be parsed.
    pub fn load<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<ChangeReceiptIndex, ProofError> {
        match store.read(&self.index_path) {
            Ok(bytes) => parse_document(&self.index_path, &bytes),
            Err(ArtifactError::NotFound(_)) => Ok(ChangeReceiptIndex::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Appends a receipt and rewrites the index.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] when the index cannot be loaded or written.
    pub fn append<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
        request: ReceiptRequest,
        issued_at: Timestamp,
    ) -> Result<ChangeReceipt, ProofError> {
        let mut index = self.load(store)?;
        let previous = index.receipts.last().map(|receipt| &receipt.receipt_id);
        let receipt_id = request
            .receipt_id
            .unwrap_or_else(|| ReceiptId::generate_after(&issued_at, previous));
        if let Some(last) = index.receipts.last().map(|receipt| &receipt.receipt_id)
            && receipt_id < *last
        {
            tracing::warn!(
                target: "proof_chain.ledger",
                receipt_id = %receipt_id,
                last_receipt_id = %last,
                "receipt appended out of order"
            );
        }

        let receipt = ChangeReceipt {
            receipt_id: receipt_id.clone(),
            issued_at: issued_at.to_string(),
            change_type: request.change_type,
            summary: request.summary,
            diff_hash: request.diff_hash,
        };
        index.receipts.push(receipt.clone());
        index.last_receipt_id = Some(receipt_id);
        index.generated_at = Some(issued_at.to_string());
        index.sha256 = Some(self_digest(&index, RECEIPT_INDEX_DIGEST_FIELD)?);
        write_json_document(store, &self.index_path, &index)?;

        tracing::info!(
            target: "proof_chain.ledger",
            receipt_id = %receipt.receipt_id,
            change_type = %receipt.change_type,
            "receipt appended"
        );
        Ok(receipt)
    }

    /// Loads and validates the index.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::NonMonotonicReceipt`] or
    /// [`ProofError::IndexDigestMismatch`] when the index is not trustworthy.
    pub fn validate<S: ArtifactStore + ?Sized>(
        &self,
        store: &S,
    ) -> Result<LedgerValidation, ProofError> {
        let index = self.load(store)?;
        self.validate_index(&index)?;
        Ok(LedgerValidation {
            receipts: index.receipts.len(),
            last_receipt_id: index.receipts.last().map(|receipt| receipt.receipt_id.clone()),
        })
    }

    /// Validates an in-memory index.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError`] on a digest mismatch or an ordering violation.
    pub fn validate_index(&self, index: &ChangeReceiptIndex) -> Result<(), ProofError> {
        if let Some(expected) = &index.sha256 {
            let actual = self_digest(index, RECEIPT_INDEX_DIGEST_FIELD)?;
            if &actual != expected {
                return Err(ProofError::IndexDigestMismatch {
                    path: self.index_path.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        if let Some((position, previous, current)) = index.first_ordering_violation() {
            return Err(ProofError::NonMonotonicReceipt {
                position,
                previous: previous.clone(),
                current: current.clone(),
            });
        }
        Ok(())
    }
}

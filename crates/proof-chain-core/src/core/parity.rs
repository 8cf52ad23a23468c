// crates/proof-chain-core/src/core/parity.rs
// ============================================================================
// Module: Cloud Parity Records
// Description: Parity status, counters, and report schema.
// Purpose: Describe how local proof digests compare with a remote registry.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Each checked artifact lands in exactly one [`ParityStatus`]. The trust
//! index is the share of comparable artifacts (`ok`, `mismatch`,
//! `missing_sha`) whose digests matched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::TenantId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Phase label stamped on parity reports.
pub const PARITY_PHASE: &str = "cloud_sync_verify";
/// Field excluded from the parity report self digest.
pub const PARITY_DIGEST_FIELD: &str = "sha256";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of one artifact comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityStatus {
    /// Local and remote digests match.
    Ok,
    /// Local and remote digests differ.
    Mismatch,
    /// Remote row absent or without a digest.
    MissingSha,
    /// Local file absent.
    NotFound,
    /// Registry query failed.
    Error,
}

impl ParityStatus {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Mismatch => "mismatch",
            Self::MissingSha => "missing_sha",
            Self::NotFound => "not_found",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ParityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-artifact parity result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityEntry {
    /// Registry filename (last path component).
    pub filename: String,
    /// Local artifact path.
    pub path: String,
    /// Classification.
    pub status: ParityStatus,
    /// Local raw-byte digest, when the file exists.
    pub local_sha: Option<String>,
    /// Remote digest, when one was returned.
    pub cloud_sha: Option<String>,
    /// Failure detail for `error` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
}

/// Per-status counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityCounters {
    /// Matching digests.
    pub ok: u64,
    /// Differing digests.
    pub mismatch: u64,
    /// Remote digest absent.
    pub missing_sha: u64,
    /// Local file absent.
    pub not_found: u64,
    /// Registry failures.
    pub errors: u64,
}

impl ParityCounters {
    /// Records one classified entry.
    pub const fn record(&mut self, status: ParityStatus) {
        match status {
            ParityStatus::Ok => self.ok += 1,
            ParityStatus::Mismatch => self.mismatch += 1,
            ParityStatus::MissingSha => self.missing_sha += 1,
            ParityStatus::NotFound => self.not_found += 1,
            ParityStatus::Error => self.errors += 1,
        }
    }

    /// Returns true when nothing disagreed and nothing failed.
    ///
    /// Artifacts missing locally do not fail parity.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.mismatch == 0 && self.missing_sha == 0 && self.errors == 0
    }

    /// Percentage of comparable artifacts that matched, rounded to two decimals.
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "Counters stay far below 2^52.")]
    pub fn trust_index(&self) -> f64 {
        let comparable = self.ok + self.mismatch + self.missing_sha;
        if comparable == 0 {
            return 0.0;
        }
        let ratio = self.ok as f64 / comparable as f64 * 100.0;
        (ratio * 100.0).round() / 100.0
    }
}

/// Parity report over a set of local artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudParityReport {
    /// Phase label.
    pub phase: String,
    /// Report time.
    pub generated_at: String,
    /// Registry tenant.
    pub tenant_id: TenantId,
    /// Whether parity holds.
    pub passed: bool,
    /// Percentage of comparable artifacts that matched.
    pub trust_index: f64,
    /// Per-status counters.
    pub counters: ParityCounters,
    /// Per-artifact results in input order.
    pub results: Vec<ParityEntry>,
    /// Canonical digest over every other field.
    pub sha256: String,
}

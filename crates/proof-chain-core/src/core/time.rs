// crates/proof-chain-core/src/core/time.rs
// ============================================================================
// Module: Proof Chain Time Model
// Description: Timestamp parsing and rendering for proof documents.
// Purpose: Give freshness checks a single, strict interpretation of time text.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Proof documents store timestamps as text and that text is hashed verbatim,
//! so documents keep `String` fields and parse on demand through
//! [`Timestamp::parse`]. The core never reads the wall clock; hosts pass the
//! current time into every operation that stamps a document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::SystemTime;

use thiserror::Error;
use time::Duration;
use time::OffsetDateTime;
use time::PrimitiveDateTime;
use time::UtcOffset;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when interpreting timestamp text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// Timestamp text was empty.
    #[error("missing timestamp value")]
    Missing,
    /// Timestamp text could not be parsed.
    #[error("unparseable timestamp '{value}'")]
    Unparseable {
        /// Offending text.
        value: String,
    },
    /// Unix seconds were outside the representable range.
    #[error("unix timestamp {0} out of range")]
    OutOfRange(i64),
}

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// UTC-normalized instant used for freshness and ordering checks.
///
/// # Invariants
/// - Always stored at UTC offset; equality ignores the offset of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Parses RFC 3339 text, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` form taken as UTC.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError`] when the text is empty or not a recognized form.
    pub fn parse(value: &str) -> Result<Self, TimeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TimeError::Missing);
        }
        if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Ok(Self::from_datetime(parsed));
        }
        let naive = format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
        );
        PrimitiveDateTime::parse(trimmed, naive)
            .map(|parsed| Self(parsed.assume_utc()))
            .map_err(|_| TimeError::Unparseable {
                value: value.to_string(),
            })
    }

    /// Wraps a datetime, normalizing it to UTC.
    #[must_use]
    pub fn from_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }

    /// Builds a timestamp from unix seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::OutOfRange`] when the value is not representable.
    pub fn from_unix_seconds(seconds: i64) -> Result<Self, TimeError> {
        OffsetDateTime::from_unix_timestamp(seconds)
            .map(Self)
            .map_err(|_| TimeError::OutOfRange(seconds))
    }

    /// Returns the underlying UTC datetime.
    #[must_use]
    pub const fn as_datetime(&self) -> OffsetDateTime {
        self.0
    }

    /// Returns unix seconds.
    #[must_use]
    pub fn unix_seconds(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// Absolute distance between two instants.
    #[must_use]
    pub fn distance(&self, other: &Self) -> Duration {
        (self.0 - other.0).abs()
    }

    /// Renders the calendar date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.0.year(), u8::from(self.0.month()), self.0.day())
    }

    /// Converts to a [`SystemTime`] for id generators keyed on wall time.
    #[must_use]
    pub fn to_system_time(&self) -> SystemTime {
        SystemTime::from(self.0)
    }
}

impl fmt::Display for Timestamp {
    /// Renders second-precision RFC 3339 with a `Z` suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}T{:02}:{:02}:{:02}Z",
            self.date_string(),
            self.0.hour(),
            self.0.minute(),
            self.0.second()
        )
    }
}

/// Parses an optional timestamp field, treating absence as [`TimeError::Missing`].
///
/// # Errors
///
/// Returns [`TimeError`] when the field is absent or unparseable.
pub fn parse_field(value: Option<&str>) -> Result<Timestamp, TimeError> {
    value.map_or(Err(TimeError::Missing), Timestamp::parse)
}

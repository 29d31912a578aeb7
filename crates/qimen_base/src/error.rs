//! Error types for calendar and table lookups.

use qimen_time::TimeError;
use thiserror::Error;

/// Errors from calendar conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// Timestamp is outside the solar-term table coverage.
    #[error("date {date} outside supported solar-term range")]
    OutOfRange { date: String },
    /// Timestamp fields are invalid.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
}

/// Errors from malformed static domain tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TableError {
    /// A Ju entry is outside 1..=9.
    #[error("Ju table entry for {term} ({yuan}) is {value}, expected 1-9")]
    JuOutOfRange {
        term: &'static str,
        yuan: &'static str,
        value: u8,
    },
    /// A layer order repeats or omits a symbol.
    #[error("malformed {0} table: {1}")]
    Malformed(&'static str, String),
}

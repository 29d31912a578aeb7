//! Error types for civil time handling.

use thiserror::Error;

/// Errors from civil date/time construction or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Text could not be parsed as a timestamp.
    #[error("timestamp parse error: {0}")]
    Parse(String),
    /// A field is outside its calendar range (e.g. month 13, Feb 30).
    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: i64 },
}

//! Error type for chart computation.

use qimen_base::{CalendarError, TableError};
use thiserror::Error;

/// Errors from [`compute_chart`](crate::compute_chart).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Timestamp invalid or outside the supported calendar range.
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),
    /// Domain tables failed validation.
    #[error("malformed table: {0}")]
    MalformedTable(#[from] TableError),
    /// An assembled layer broke a structural invariant. Always a defect.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

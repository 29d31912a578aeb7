//! Civil calendar arithmetic for the qimen chart engine.
//!
//! This crate provides:
//! - Julian Day Number ↔ proleptic Gregorian calendar conversions
//! - `CivilDate` / `CivilTime` value types with validation and parsing
//!
//! All arithmetic is integral: charts are resolved to whole seconds and
//! calendar days, so no floating-point epochs are involved.

pub mod civil_time;
pub mod error;
pub mod julian;

pub use civil_time::{CivilDate, CivilTime};
pub use error::TimeError;
pub use julian::{calendar_to_jdn, days_in_month, is_leap_year, jdn_to_calendar};

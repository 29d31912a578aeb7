//! Civil calendar date and time of day.
//!
//! `CivilTime` is the timestamp accepted by the chart engine: a proleptic
//! Gregorian wall-clock reading with whole-second precision and no zone.
//! Charts are cast in local solar practice, so the caller decides which
//! clock the reading comes from.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::TimeError;
use crate::julian::{calendar_to_jdn, days_in_month, jdn_to_calendar};

/// A calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    /// Create a validated date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        let date = Self { year, month, day };
        date.validate()?;
        Ok(date)
    }

    /// Check month and day against the Gregorian calendar.
    pub fn validate(&self) -> Result<(), TimeError> {
        if !(1..=12).contains(&self.month) {
            return Err(TimeError::InvalidField {
                field: "month",
                value: self.month as i64,
            });
        }
        if self.day == 0 || self.day > days_in_month(self.year, self.month) {
            return Err(TimeError::InvalidField {
                field: "day",
                value: self.day as i64,
            });
        }
        Ok(())
    }

    /// Julian Day Number of this date.
    pub fn jdn(&self) -> i64 {
        calendar_to_jdn(self.year, self.month, self.day)
    }

    /// Date for a Julian Day Number.
    pub fn from_jdn(jdn: i64) -> Self {
        let (year, month, day) = jdn_to_calendar(jdn);
        Self { year, month, day }
    }

    /// Date shifted by a signed number of days.
    pub fn add_days(&self, days: i64) -> Self {
        Self::from_jdn(self.jdn() + days)
    }

    /// Signed day count from `earlier` to `self`.
    pub fn days_since(&self, earlier: &CivilDate) -> i64 {
        self.jdn() - earlier.jdn()
    }
}

impl Display for CivilDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Civil date with wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilTime {
    /// Create a validated timestamp.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, TimeError> {
        let t = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        t.validate()?;
        Ok(t)
    }

    /// Check every field against its range.
    pub fn validate(&self) -> Result<(), TimeError> {
        self.date().validate()?;
        if self.hour > 23 {
            return Err(TimeError::InvalidField {
                field: "hour",
                value: self.hour as i64,
            });
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidField {
                field: "minute",
                value: self.minute as i64,
            });
        }
        if self.second > 59 {
            return Err(TimeError::InvalidField {
                field: "second",
                value: self.second as i64,
            });
        }
        Ok(())
    }

    /// The calendar day of this timestamp.
    pub fn date(&self) -> CivilDate {
        CivilDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    /// Julian Day Number of the calendar day.
    pub fn jdn(&self) -> i64 {
        self.date().jdn()
    }

    /// Seconds elapsed since local midnight.
    pub fn seconds_of_day(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }

    /// Parse the compact 14-digit `yyyymmddhhmmss` form.
    pub fn parse_compact(s: &str) -> Result<Self, TimeError> {
        if s.len() != 14 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::Parse(format!(
                "expected 14 digits yyyymmddhhmmss, got '{s}'"
            )));
        }
        let field = |range: std::ops::Range<usize>| -> u32 {
            s[range].parse::<u32>().unwrap_or_default()
        };
        Self::new(
            field(0..4) as i32,
            field(4..6),
            field(6..8),
            field(8..10),
            field(10..12),
            field(12..14),
        )
    }
}

impl FromStr for CivilTime {
    type Err = TimeError;

    /// Accepts `YYYY-MM-DDThh:mm:ss` (optional trailing `Z`, space instead of
    /// `T`, optional seconds), a bare `YYYY-MM-DD` (midnight), or the compact
    /// `yyyymmddhhmmss` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() == 14 && s.bytes().all(|b| b.is_ascii_digit()) {
            return Self::parse_compact(s);
        }
        let s = s.strip_suffix('Z').unwrap_or(s);
        let (date_part, time_part) = match s.split_once(['T', ' ']) {
            Some((d, t)) => (d, Some(t)),
            None => (s, None),
        };

        let bad = || TimeError::Parse(format!("unrecognised timestamp '{s}'"));
        let num = |p: &str| p.parse::<u32>().map_err(|_| bad());

        let mut date_fields = date_part.splitn(3, '-');
        let (Some(y), Some(mo), Some(d)) =
            (date_fields.next(), date_fields.next(), date_fields.next())
        else {
            return Err(bad());
        };
        let year = y.parse::<i32>().map_err(|_| bad())?;
        let month = num(mo)?;
        let day = num(d)?;

        let (hour, minute, second) = match time_part {
            None => (0, 0, 0),
            Some(t) => {
                let mut parts = t.split(':');
                let hour = parts.next().map(num).transpose()?.ok_or_else(bad)?;
                let minute = parts.next().map(num).transpose()?.ok_or_else(bad)?;
                let second = parts.next().map(num).transpose()?.unwrap_or(0);
                if parts.next().is_some() {
                    return Err(bad());
                }
                (hour, minute, second)
            }
        };
        Self::new(year, month, day, hour, minute, second)
    }
}

impl Display for CivilTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl From<NaiveDateTime> for CivilTime {
    /// Leap-second readings (`:60`) are clamped to `:59`.
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second().min(59),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_bad_fields() {
        assert!(CivilTime::new(2024, 2, 30, 0, 0, 0).is_err());
        assert!(CivilTime::new(2024, 13, 1, 0, 0, 0).is_err());
        assert!(CivilTime::new(2024, 1, 1, 24, 0, 0).is_err());
        assert!(CivilTime::new(2024, 1, 1, 0, 60, 0).is_err());
        assert!(CivilTime::new(2024, 1, 1, 0, 0, 60).is_err());
        assert!(CivilTime::new(2024, 2, 29, 23, 59, 59).is_ok());
    }

    #[test]
    fn parse_iso() {
        let t: CivilTime = "2024-02-10T12:30:05".parse().unwrap();
        assert_eq!(t, CivilTime::new(2024, 2, 10, 12, 30, 5).unwrap());
    }

    #[test]
    fn parse_iso_with_zulu_and_space() {
        let a: CivilTime = "2024-02-10T12:30:00Z".parse().unwrap();
        let b: CivilTime = "2024-02-10 12:30".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_date_only_is_midnight() {
        let t: CivilTime = "2025-09-01".parse().unwrap();
        assert_eq!((t.hour, t.minute, t.second), (0, 0, 0));
    }

    #[test]
    fn parse_compact() {
        let t: CivilTime = "20250901153000".parse().unwrap();
        assert_eq!(t, CivilTime::new(2025, 9, 1, 15, 30, 0).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("2025/09/01".parse::<CivilTime>().is_err());
        assert!("2025-09-01T12".parse::<CivilTime>().is_err());
        assert!("2025-09-01T12:00:00:00".parse::<CivilTime>().is_err());
        assert!("20250931120000".parse::<CivilTime>().is_err());
    }

    #[test]
    fn display_roundtrips() {
        let t = CivilTime::new(1901, 1, 6, 0, 0, 0).unwrap();
        assert_eq!(t.to_string(), "1901-01-06T00:00:00");
        assert_eq!(t.to_string().parse::<CivilTime>().unwrap(), t);
    }

    #[test]
    fn date_arithmetic() {
        let d = CivilDate::new(2024, 2, 28).unwrap();
        assert_eq!(d.add_days(2), CivilDate::new(2024, 3, 1).unwrap());
        assert_eq!(d.add_days(2).days_since(&d), 2);
        assert_eq!(d.add_days(-59), CivilDate::new(2023, 12, 31).unwrap());
    }

    #[test]
    fn from_chrono() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 2, 10)
            .unwrap()
            .and_hms_opt(23, 15, 0)
            .unwrap();
        let t = CivilTime::from(dt);
        assert_eq!(t, CivilTime::new(2024, 2, 10, 23, 15, 0).unwrap());
    }
}

//! The four sexagenary pillars (四柱) of a timestamp.
//!
//! - Year: changes at 立春, counted so that CE 4 is 甲子.
//! - Month: branch fixed by the governing *jie* term, stem continuing from
//!   the year stem (the 寅 month of a 甲/己 year is 丙寅).
//! - Day: `(JDN + 49) mod 60`.
//! - Hour: twelve two-hour slots; the stem continues from the day stem (the
//!   子 hour of a 甲/己 day is 甲子).

use std::fmt::{Display, Formatter};

use qimen_time::{CivilDate, CivilTime};

use crate::error::CalendarError;
use crate::ganzhi::{Branch, GanZhi};
use crate::solar_term::{SolarTerm, TermInfo, active_term, term_start};

/// Offset from JDN to the sexagenary day count (JDN 11 was a 甲子 day).
const DAY_EPOCH_OFFSET: i64 = 49;

/// Which of the four pillars a GanZhi stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PillarRole {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarRole {
    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Year => "年",
            Self::Month => "月",
            Self::Day => "日",
            Self::Hour => "时",
        }
    }
}

/// A GanZhi tagged with its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pillar {
    pub role: PillarRole,
    pub ganzhi: GanZhi,
}

/// Year, month, day and hour pillars of one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourPillars {
    pub year: GanZhi,
    pub month: GanZhi,
    pub day: GanZhi,
    pub hour: GanZhi,
}

impl FourPillars {
    /// The pillars in conventional order, each tagged with its role.
    pub fn pillars(&self) -> [Pillar; 4] {
        [
            Pillar {
                role: PillarRole::Year,
                ganzhi: self.year,
            },
            Pillar {
                role: PillarRole::Month,
                ganzhi: self.month,
            },
            Pillar {
                role: PillarRole::Day,
                ganzhi: self.day,
            },
            Pillar {
                role: PillarRole::Hour,
                ganzhi: self.hour,
            },
        ]
    }

    pub fn get(&self, role: PillarRole) -> GanZhi {
        match role {
            PillarRole::Year => self.year,
            PillarRole::Month => self.month,
            PillarRole::Day => self.day,
            PillarRole::Hour => self.hour,
        }
    }
}

impl Display for FourPillars {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

/// How the 23:00–23:59 half of the 子 hour is assigned to a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZiHourRule {
    /// The day pillar advances at 23:00.
    #[default]
    NextDayAtZi,
    /// The day pillar advances at midnight; 23:xx keeps the civil day but
    /// takes its hour stem from the following day (早晚子时).
    SplitAtMidnight,
}

/// Calendar facts for one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarInfo {
    pub pillars: FourPillars,
    /// Solar term governing the civil date.
    pub term: TermInfo,
    /// Gregorian year in which the current 立春 year began.
    pub solar_year: i32,
}

/// Sexagenary day for a civil date.
pub fn day_ganzhi(date: &CivilDate) -> GanZhi {
    GanZhi::from_count(date.jdn() + DAY_EPOCH_OFFSET)
}

/// Sexagenary year for a 立春-based solar year.
pub fn year_ganzhi(solar_year: i32) -> GanZhi {
    GanZhi::from_count(solar_year as i64 - 4)
}

/// Month pillar from the year pillar and the month branch.
pub fn month_ganzhi(year: GanZhi, month_branch: Branch) -> GanZhi {
    // Months since the 寅 month opening the solar year.
    let offset = month_branch.steps_from(Branch::Yin) as i64;
    GanZhi::from_count(12 * year.stem().index() as i64 + 2 + offset)
}

/// Hour pillar from the stem-bearing day and the hour branch.
pub fn hour_ganzhi(day: GanZhi, hour_branch: Branch) -> GanZhi {
    GanZhi::from_count(12 * day.stem().index() as i64 + hour_branch.index() as i64)
}

/// Compute the four pillars and governing solar term of a timestamp.
pub fn calendar_info(time: &CivilTime, zi_rule: ZiHourRule) -> Result<CalendarInfo, CalendarError> {
    time.validate()?;
    let date = time.date();
    let term = active_term(&date)?;

    let lichun = term_start(date.year, SolarTerm::LiChun)?;
    let solar_year = if date < lichun {
        date.year - 1
    } else {
        date.year
    };
    let year = year_ganzhi(solar_year);
    let month = month_ganzhi(year, term.term.month_branch());

    let hour_branch = Branch::from_hour(time.hour);
    let late_zi = time.hour == 23;
    let stem_day = if late_zi {
        day_ganzhi(&date.add_days(1))
    } else {
        day_ganzhi(&date)
    };
    let day = match zi_rule {
        ZiHourRule::NextDayAtZi => stem_day,
        ZiHourRule::SplitAtMidnight => day_ganzhi(&date),
    };
    let hour = hour_ganzhi(stem_day, hour_branch);

    Ok(CalendarInfo {
        pillars: FourPillars {
            year,
            month,
            day,
            hour,
        },
        term,
        solar_year,
    })
}

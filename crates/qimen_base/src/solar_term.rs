//! The 24 solar terms (节气) and their civil start dates.
//!
//! Start dates come from the century-constant approximation
//! `day = floor(Y * 0.2422 + C) - L`, where `Y` is the year within its
//! century, `C` a per-term constant for that century, and `L` the count of
//! leap days already elapsed. A short table corrects the years where the
//! approximation lands one day off the published almanac.
//!
//! Coverage is 1901–2100. A term is taken to begin at 00:00 of its date;
//! intra-day term instants are not modelled.

use std::fmt::{Display, Formatter};

use qimen_time::CivilDate;

use crate::error::CalendarError;
use crate::ganzhi::Branch;

/// First Gregorian year with tabulated term dates.
pub const FIRST_SUPPORTED_YEAR: i32 = 1901;
/// Last Gregorian year with tabulated term dates.
pub const LAST_SUPPORTED_YEAR: i32 = 2100;

/// The 24 solar terms in Gregorian calendar order (小寒 opens the year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolarTerm {
    XiaoHan,
    DaHan,
    LiChun,
    YuShui,
    JingZhe,
    ChunFen,
    QingMing,
    GuYu,
    LiXia,
    XiaoMan,
    MangZhong,
    XiaZhi,
    XiaoShu,
    DaShu,
    LiQiu,
    ChuShu,
    BaiLu,
    QiuFen,
    HanLu,
    ShuangJiang,
    LiDong,
    XiaoXue,
    DaXue,
    DongZhi,
}

/// All 24 terms in Gregorian order (index 0 = 小寒).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::XiaoHan,
    SolarTerm::DaHan,
    SolarTerm::LiChun,
    SolarTerm::YuShui,
    SolarTerm::JingZhe,
    SolarTerm::ChunFen,
    SolarTerm::QingMing,
    SolarTerm::GuYu,
    SolarTerm::LiXia,
    SolarTerm::XiaoMan,
    SolarTerm::MangZhong,
    SolarTerm::XiaZhi,
    SolarTerm::XiaoShu,
    SolarTerm::DaShu,
    SolarTerm::LiQiu,
    SolarTerm::ChuShu,
    SolarTerm::BaiLu,
    SolarTerm::QiuFen,
    SolarTerm::HanLu,
    SolarTerm::ShuangJiang,
    SolarTerm::LiDong,
    SolarTerm::XiaoXue,
    SolarTerm::DaXue,
    SolarTerm::DongZhi,
];

const TERM_CHINESE: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
    "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

const TERM_PINYIN: [&str; 24] = [
    "XiaoHan",
    "DaHan",
    "LiChun",
    "YuShui",
    "JingZhe",
    "ChunFen",
    "QingMing",
    "GuYu",
    "LiXia",
    "XiaoMan",
    "MangZhong",
    "XiaZhi",
    "XiaoShu",
    "DaShu",
    "LiQiu",
    "ChuShu",
    "BaiLu",
    "QiuFen",
    "HanLu",
    "ShuangJiang",
    "LiDong",
    "XiaoXue",
    "DaXue",
    "DongZhi",
];

/// Century constants for 1901–2000.
const C_20TH: [f64; 24] = [
    6.11, 20.84, 4.6295, 19.4599, 6.3826, 21.4155, 5.59, 20.888, 6.318, 21.86, 6.5, 22.20, 7.928,
    23.65, 8.35, 23.95, 8.44, 23.822, 9.098, 24.218, 8.218, 23.08, 7.9, 22.60,
];

/// Century constants for 2001–2100.
const C_21ST: [f64; 24] = [
    5.4055, 20.12, 3.87, 18.73, 5.63, 20.646, 4.81, 20.1, 5.52, 21.04, 5.678, 21.37, 7.108, 22.83,
    7.5, 23.13, 7.646, 23.042, 8.318, 23.438, 7.438, 22.36, 7.18, 21.94,
];

/// `(year, term, day delta)` corrections to the century formula.
const CORRECTIONS: [(i32, SolarTerm, i8); 21] = [
    (1982, SolarTerm::XiaoHan, 1),
    (2019, SolarTerm::XiaoHan, -1),
    (2082, SolarTerm::DaHan, 1),
    (2026, SolarTerm::YuShui, -1),
    (2084, SolarTerm::ChunFen, 1),
    (1911, SolarTerm::LiXia, 1),
    (2008, SolarTerm::XiaoMan, 1),
    (1902, SolarTerm::MangZhong, 1),
    (1928, SolarTerm::XiaZhi, 1),
    (1925, SolarTerm::XiaoShu, 1),
    (2016, SolarTerm::XiaoShu, 1),
    (1922, SolarTerm::DaShu, 1),
    (2002, SolarTerm::LiQiu, 1),
    (1927, SolarTerm::BaiLu, 1),
    (1942, SolarTerm::QiuFen, 1),
    (2089, SolarTerm::ShuangJiang, 1),
    (2089, SolarTerm::LiDong, 1),
    (1978, SolarTerm::XiaoXue, 1),
    (1954, SolarTerm::DaXue, 1),
    (1918, SolarTerm::DongZhi, -1),
    (2021, SolarTerm::DongZhi, -1),
];

impl SolarTerm {
    /// 0-based index in Gregorian order (小寒=0 .. 冬至=23).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Term for an index, wrapping modulo 24.
    pub const fn from_index(index: u8) -> Self {
        ALL_SOLAR_TERMS[(index % 24) as usize]
    }

    pub const fn chinese(self) -> &'static str {
        TERM_CHINESE[self as usize]
    }

    pub const fn name(self) -> &'static str {
        TERM_PINYIN[self as usize]
    }

    /// Parse from Chinese or pinyin (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        ALL_SOLAR_TERMS
            .iter()
            .copied()
            .find(|t| t.chinese() == s || t.name().eq_ignore_ascii_case(s))
    }

    /// The following term, wrapping 冬至 → 小寒.
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Whether this is a *jie* (节) term, the kind that opens a month.
    pub const fn is_jie(self) -> bool {
        self.index() % 2 == 0
    }

    /// The *jie* term governing this term's month (itself if already a jie).
    pub const fn jie(self) -> Self {
        Self::from_index(self.index() - self.index() % 2)
    }

    /// Branch of the solar month this term falls in (立春 → 寅, 小寒 → 丑).
    pub const fn month_branch(self) -> Branch {
        Branch::from_index(self.jie().index() / 2 + 1)
    }

    /// Apparent solar ecliptic longitude at the start of the term, in degrees.
    pub const fn solar_longitude_deg(self) -> u16 {
        (285 + 15 * self.index() as u16) % 360
    }

    /// Gregorian month in which the term starts.
    pub const fn civil_month(self) -> u32 {
        self.index() as u32 / 2 + 1
    }
}

impl Display for SolarTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

fn out_of_range(label: impl Display) -> CalendarError {
    CalendarError::OutOfRange {
        date: label.to_string(),
    }
}

/// Civil start date of `term` in Gregorian `year`.
pub fn term_start(year: i32, term: SolarTerm) -> Result<CivilDate, CalendarError> {
    if !(FIRST_SUPPORTED_YEAR..=LAST_SUPPORTED_YEAR).contains(&year) {
        return Err(out_of_range(format!("{year} {term}")));
    }
    let (constants, y) = if year <= 2000 {
        (&C_20TH, year - 1900)
    } else {
        (&C_21ST, year - 2000)
    };
    let i = term.index() as usize;
    // Terms before 春分 fall ahead of the leap day of their own year.
    let leap_days = if i < 4 { (y - 1) / 4 } else { y / 4 };
    let base = (y as f64 * 0.2422 + constants[i]).floor() as i32 - leap_days;
    let delta = CORRECTIONS
        .iter()
        .find(|&&(cy, ct, _)| cy == year && ct == term)
        .map_or(0, |&(_, _, d)| d as i32);
    CivilDate::new(year, term.civil_month(), (base + delta) as u32).map_err(CalendarError::from)
}

/// All 24 term start dates of a Gregorian year, in calendar order.
pub fn terms_of_year(year: i32) -> Result<[(SolarTerm, CivilDate); 24], CalendarError> {
    let mut out = [(SolarTerm::XiaoHan, CivilDate {
        year,
        month: 1,
        day: 1,
    }); 24];
    for (slot, term) in out.iter_mut().zip(ALL_SOLAR_TERMS) {
        *slot = (term, term_start(year, term)?);
    }
    Ok(out)
}

/// The solar term in force on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermInfo {
    /// The governing term.
    pub term: SolarTerm,
    /// First day of the term.
    pub start: CivilDate,
    /// First day of the following term; `None` past the table's last term.
    pub end: Option<CivilDate>,
}

impl TermInfo {
    /// Whole days from the term start to `date` (0 on the start date).
    pub fn elapsed_days(&self, date: &CivilDate) -> i64 {
        date.days_since(&self.start)
    }
}

/// Locate the solar term governing a civil date.
///
/// Dates before 小寒 1901 or after the end of 2100 are out of range.
pub fn active_term(date: &CivilDate) -> Result<TermInfo, CalendarError> {
    let year = date.year;
    if year > LAST_SUPPORTED_YEAR {
        return Err(out_of_range(date));
    }
    let mut found = None;
    if year >= FIRST_SUPPORTED_YEAR {
        for term in ALL_SOLAR_TERMS.iter().rev().copied() {
            let start = term_start(year, term)?;
            if start <= *date {
                found = Some((term, start));
                break;
            }
        }
    }
    let (term, start) = match found {
        Some(hit) => hit,
        // Before this year's 小寒: last year's 冬至 still governs.
        None if year > FIRST_SUPPORTED_YEAR => {
            (SolarTerm::DongZhi, term_start(year - 1, SolarTerm::DongZhi)?)
        }
        None => return Err(out_of_range(date)),
    };
    let next_year = if term == SolarTerm::DongZhi {
        start.year + 1
    } else {
        start.year
    };
    let end = term_start(next_year, term.next()).ok();
    Ok(TermInfo { term, start, end })
}

//! Cycle direction (遁), Yuan (元) and Ju (局) selection.
//!
//! Each solar term spans three five-day Yuan. The term fixes the direction
//! the earth plate is laid in; the term and Yuan together fix the Ju number.

use std::fmt::{Display, Formatter};

use qimen_time::CivilDate;

use crate::error::TableError;
use crate::ganzhi::{Branch, GanZhi};
use crate::palace::{ALL_PALACES, Palace};
use crate::solar_term::{SolarTerm, TermInfo};
use crate::tables::QimenTables;

/// Direction of the nine-palace walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dun {
    /// 阳遁: 冬至 through 芒种, ascending palace order.
    Yang,
    /// 阴遁: 夏至 through 大雪, descending palace order.
    Yin,
}

impl Dun {
    pub const fn of_term(term: SolarTerm) -> Self {
        match term {
            SolarTerm::DongZhi
            | SolarTerm::XiaoHan
            | SolarTerm::DaHan
            | SolarTerm::LiChun
            | SolarTerm::YuShui
            | SolarTerm::JingZhe
            | SolarTerm::ChunFen
            | SolarTerm::QingMing
            | SolarTerm::GuYu
            | SolarTerm::LiXia
            | SolarTerm::XiaoMan
            | SolarTerm::MangZhong => Self::Yang,
            _ => Self::Yin,
        }
    }

    pub const fn is_yang(self) -> bool {
        matches!(self, Self::Yang)
    }

    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Yang => "阳遁",
            Self::Yin => "阴遁",
        }
    }
}

impl Display for Dun {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// One of the three five-day windows of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Yuan {
    Upper,
    Middle,
    Lower,
}

/// The three Yuan in order.
pub const ALL_YUAN: [Yuan; 3] = [Yuan::Upper, Yuan::Middle, Yuan::Lower];

impl Yuan {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn chinese(self) -> &'static str {
        match self {
            Self::Upper => "上元",
            Self::Middle => "中元",
            Self::Lower => "下元",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Upper => "Upper",
            Self::Middle => "Middle",
            Self::Lower => "Lower",
        }
    }
}

impl Display for Yuan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chinese())
    }
}

/// A Ju number, always in 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ju(u8);

impl Ju {
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= 9 { Some(Self(n)) } else { None }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// The palace the earth plate starts from.
    pub const fn palace(self) -> Palace {
        ALL_PALACES[(self.0 - 1) as usize]
    }
}

impl Display for Ju {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}局", self.0)
    }
}

/// How the Yuan within a term is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YuanMethod {
    /// Days since the term started: 0–4 Upper, 5–9 Middle, then Lower.
    #[default]
    ElapsedDays,
    /// From the branch of the day's Fu Tou (the latest 甲 or 己 day).
    FuTou,
}

/// Result of period selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodInfo {
    pub dun: Dun,
    pub yuan: Yuan,
    pub ju: Ju,
    /// Whole days since the term started.
    pub elapsed_days: i64,
}

/// Yuan from the number of days elapsed in the term.
pub const fn yuan_from_elapsed(days: i64) -> Yuan {
    if days < 5 {
        Yuan::Upper
    } else if days < 10 {
        Yuan::Middle
    } else {
        Yuan::Lower
    }
}

/// The Fu Tou (符头) of a day: the nearest preceding 甲 or 己 day.
pub const fn fu_tou(day: GanZhi) -> GanZhi {
    let i = day.index();
    GanZhi::from_index(i - i % 5)
}

/// Yuan from the branch of the day's Fu Tou.
pub const fn yuan_from_fu_tou(day: GanZhi) -> Yuan {
    match fu_tou(day).branch() {
        Branch::Zi | Branch::Wu | Branch::Mao | Branch::You => Yuan::Upper,
        Branch::Yin | Branch::Shen | Branch::Si | Branch::Hai => Yuan::Middle,
        Branch::Chen | Branch::Xu | Branch::Chou | Branch::Wei => Yuan::Lower,
    }
}

/// Select direction, Yuan and Ju for a date inside a known term.
pub fn select_period(
    term: &TermInfo,
    date: &CivilDate,
    day: GanZhi,
    method: YuanMethod,
    tables: &QimenTables,
) -> Result<PeriodInfo, TableError> {
    let elapsed_days = term.elapsed_days(date);
    let yuan = match method {
        YuanMethod::ElapsedDays => yuan_from_elapsed(elapsed_days),
        YuanMethod::FuTou => yuan_from_fu_tou(day),
    };
    Ok(PeriodInfo {
        dun: Dun::of_term(term.term),
        yuan,
        ju: tables.ju(term.term, yuan)?,
        elapsed_days,
    })
}

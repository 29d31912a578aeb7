//! Calendar primitives and static tables for Qi Men Dun Jia charts.
//!
//! This crate provides:
//! - Stems, branches, the sexagenary cycle and its six Xun
//! - The nine palaces and the `PalaceGrid` arena for chart layers
//! - Stars, doors and spirits with their home positions
//! - Solar-term dates for 1901–2100 and the four pillars of a timestamp
//! - Dun/Yuan/Ju period selection, void and horse branches
//! - `QimenTables`: the symbol orders every placer reads from
//!
//! Everything here is pure data and arithmetic; chart assembly lives in
//! `qimen_engine`.

pub mod auxiliary;
pub mod door;
pub mod error;
pub mod ganzhi;
pub mod palace;
pub mod period;
pub mod pillars;
pub mod solar_term;
pub mod spirit;
pub mod star;
pub mod tables;

pub use auxiliary::{AuxiliaryInfo, compute_auxiliary, void_branches};
pub use door::{ALL_DOORS, Door};
pub use error::{CalendarError, TableError};
pub use ganzhi::{ALL_BRANCHES, ALL_STEMS, Branch, GanZhi, Stem, Xun};
pub use palace::{
    ALL_PALACES, Palace, PalaceGrid, RING, Slot, luoshu_distance, ring_offset, rotate_ring,
};
pub use period::{
    ALL_YUAN, Dun, Ju, PeriodInfo, Yuan, YuanMethod, fu_tou, select_period, yuan_from_elapsed,
    yuan_from_fu_tou,
};
pub use pillars::{
    CalendarInfo, FourPillars, Pillar, PillarRole, ZiHourRule, calendar_info, day_ganzhi,
    hour_ganzhi, month_ganzhi, year_ganzhi,
};
pub use solar_term::{
    ALL_SOLAR_TERMS, FIRST_SUPPORTED_YEAR, LAST_SUPPORTED_YEAR, SolarTerm, TermInfo, active_term,
    term_start, terms_of_year,
};
pub use spirit::{ALL_SPIRITS, Spirit};
pub use star::{ALL_STARS, Star};
pub use tables::{QimenTables, STANDARD_TABLES};

//! Chart construction options.
//!
//! Every option has a default; the alternatives reproduce other
//! conventions found in practice.

use qimen_base::{Dun, FourPillars, GanZhi, Palace, PillarRole};

pub use qimen_base::{YuanMethod, ZiHourRule};

/// Which pillar's decade selects the Xun leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum XunAnchor {
    /// The day pillar.
    #[default]
    Day,
    /// The hour pillar (时家奇门).
    Hour,
}

impl XunAnchor {
    pub const fn role(self) -> PillarRole {
        match self {
            Self::Hour => PillarRole::Hour,
            Self::Day => PillarRole::Day,
        }
    }
}

/// Where the center palace lodges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LodgingRule {
    /// Palace 2 under Yang Dun, palace 8 under Yin Dun.
    #[default]
    ByDun,
    /// Always palace 2.
    AlwaysKun,
}

impl LodgingRule {
    /// Lodging host for a cycle direction. Always an outer palace.
    pub const fn host(self, dun: Dun) -> Palace {
        match (self, dun) {
            (Self::ByDun, Dun::Yin) => Palace::Gen,
            _ => Palace::Kun,
        }
    }
}

/// Palace the duty door's hour count starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DoorStart {
    /// The leader's own palace; palace 5 when the leader is lodged.
    #[default]
    Leader,
    /// The duty door's home palace, which is the duty position.
    DoorHome,
    /// No count: the duty door goes to the palace of the hour branch.
    HourBranch,
}

/// Direction the eight spirits run from 值符.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpiritDirection {
    /// Clockwise under Yang Dun, counter-clockwise under Yin Dun.
    #[default]
    FollowDun,
    /// Clockwise regardless of direction.
    AlwaysAscending,
}

impl SpiritDirection {
    pub const fn clockwise(self, dun: Dun) -> bool {
        match self {
            Self::FollowDun => dun.is_yang(),
            Self::AlwaysAscending => true,
        }
    }
}

/// Options for chart construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChartConfig {
    /// How the Yuan within a term is chosen. Default: elapsed days.
    pub yuan_method: YuanMethod,
    /// Pillar whose decade supplies the Xun leader. Default: day.
    pub xun_anchor: XunAnchor,
    /// Start of the duty door's count. Default: the leader's palace.
    pub door_start: DoorStart,
    /// Lodging host of the center palace. Default: by Dun.
    pub lodging: LodgingRule,
    /// Spirit placement direction. Default: follow Dun.
    pub spirit_direction: SpiritDirection,
    /// Day assignment of 23:00–23:59. Default: next day.
    pub zi_hour: ZiHourRule,
}

impl ChartConfig {
    /// The pillar whose decade anchors the duty lookup.
    pub fn anchor_pillar(&self, pillars: &FourPillars) -> GanZhi {
        pillars.get(self.xun_anchor.role())
    }
}

//! Void branches (空亡) and the horse branch (驿马).

use crate::ganzhi::{Branch, GanZhi};
use crate::pillars::FourPillars;
use crate::tables::QimenTables;

/// The two branches left unreached by the decade of a pillar.
///
/// A pillar's own branch is never void for it: the decade's ten stems cover
/// ten branches, the pillar's among them.
pub fn void_branches(pillar: GanZhi) -> [Branch; 2] {
    pillar.xun().void_branches()
}

/// Void and horse branches of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuxiliaryInfo {
    /// Void branches of the day pillar's decade.
    pub day_void: [Branch; 2],
    /// Void branches of the hour pillar's decade.
    pub hour_void: [Branch; 2],
    /// Horse keyed on the hour branch.
    pub horse: Branch,
    /// Horse keyed on the day branch.
    pub day_horse: Branch,
}

pub fn compute_auxiliary(pillars: &FourPillars, tables: &QimenTables) -> AuxiliaryInfo {
    AuxiliaryInfo {
        day_void: void_branches(pillars.day),
        hour_void: void_branches(pillars.hour),
        horse: tables.horse_for(pillars.hour.branch()),
        day_horse: tables.horse_for(pillars.day.branch()),
    }
}

//! Duty star (值符) and duty door (值使) lookup.
//!
//! The anchor pillar's decade names a leader stem. The outer palace holding
//! that stem on the earth plate is the duty position; its home star and home
//! door go on duty. The rotations then carry the duty star to the palace of
//! the hour stem and the duty door to the palace reached by counting hours
//! from the decade head.

use qimen_base::{Door, Dun, FourPillars, Palace, PalaceGrid, QimenTables, Star, Stem, Xun};

use crate::config::{ChartConfig, DoorStart};
use crate::earth::{StemCell, locate_stem};
use crate::error::EngineError;

/// Duty lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DutyInfo {
    /// Decade of the anchor pillar.
    pub xun: Xun,
    /// Stem hiding the decade's 甲.
    pub leader: Stem,
    /// Outer palace holding the leader on the earth plate.
    pub position: Palace,
    /// Whether the leader is the lodged center stem.
    pub leader_lodged: bool,
    /// Duty star: home star of the position, or the center star if lodged.
    pub star: Star,
    /// Duty door: home door of the position.
    pub door: Door,
    /// Hour stem with 甲 replaced by its decade leader.
    pub hour_stem: Stem,
    /// Palace the duty star rotates to.
    pub star_target: Palace,
    /// Palace the duty door rotates to.
    pub door_target: Palace,
}

fn missing(what: &str) -> EngineError {
    EngineError::InvariantViolation(format!("{what} not on the earth plate"))
}

/// Locate the duty position and the rotation targets.
pub fn locate_duty(
    pillars: &FourPillars,
    earth: &PalaceGrid<StemCell>,
    dun: Dun,
    config: &ChartConfig,
    tables: &QimenTables,
) -> Result<DutyInfo, EngineError> {
    let xun = config.anchor_pillar(pillars).xun();
    let leader = tables.xun_leader(xun);
    let at = locate_stem(earth, leader).ok_or_else(|| missing("xun leader"))?;

    let star = if at.lodged {
        tables.center_star
    } else {
        tables.home_star(at.palace)
    };
    let door = tables
        .home_door(at.palace)
        .ok_or_else(|| EngineError::InvariantViolation("duty position has no door".into()))?;

    let hour = pillars.hour;
    let hour_stem = if hour.stem() == Stem::Jia {
        tables.xun_leader(hour.xun())
    } else {
        hour.stem()
    };
    let star_target = locate_stem(earth, hour_stem)
        .ok_or_else(|| missing("hour stem"))?
        .palace;

    // Walk one palace per hour from the start; landing on the center
    // resolves to its host.
    let steps = hour.branch().steps_from(xun.head().branch()) as u32;
    let walked = match config.door_start {
        DoorStart::Leader if at.lodged => Palace::Center.luoshu_step(steps, dun.is_yang()),
        DoorStart::Leader | DoorStart::DoorHome => at.palace.luoshu_step(steps, dun.is_yang()),
        DoorStart::HourBranch => hour.branch().palace(),
    };
    let door_target = if walked.is_center() {
        earth.host()
    } else {
        walked
    };

    Ok(DutyInfo {
        xun,
        leader,
        position: at.palace,
        leader_lodged: at.lodged,
        star,
        door,
        hour_stem,
        star_target,
        door_target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::XunAnchor;
    use crate::earth::place_earth;
    use qimen_base::{GanZhi, Ju};

    fn pillars(day: &str, hour: &str) -> FourPillars {
        let gz = |s| GanZhi::from_name(s).unwrap();
        FourPillars {
            year: gz("甲子"),
            month: gz("丙寅"),
            day: gz(day),
            hour: gz(hour),
        }
    }

    fn plate(ju: u8, dun: Dun, host: Palace) -> PalaceGrid<StemCell> {
        place_earth(Ju::new(ju).unwrap(), dun, host, QimenTables::standard()).unwrap()
    }

    fn hour_anchor() -> ChartConfig {
        ChartConfig {
            xun_anchor: XunAnchor::Hour,
            ..ChartConfig::default()
        }
    }

    #[test]
    fn lodged_leader_puts_qin_on_duty() {
        let earth = plate(5, Dun::Yang, Palace::Kun);
        let duty = locate_duty(
            &pillars("甲辰", "庚午"),
            &earth,
            Dun::Yang,
            &hour_anchor(),
            QimenTables::standard(),
        )
        .unwrap();
        assert_eq!(duty.xun, Xun::JiaZi);
        assert_eq!(duty.leader, Stem::Wu);
        assert_eq!(duty.position, Palace::Kun);
        assert!(duty.leader_lodged);
        assert_eq!(duty.star, Star::Qin);
        assert_eq!(duty.door, Door::Death);
        assert_eq!(duty.star_target, Palace::Dui);
        assert_eq!(duty.door_target, Palace::Kun);
    }

    #[test]
    fn plain_leader_in_yin_dun() {
        let earth = plate(4, Dun::Yin, Palace::Gen);
        let duty = locate_duty(
            &pillars("癸酉", "庚申"),
            &earth,
            Dun::Yin,
            &hour_anchor(),
            QimenTables::standard(),
        )
        .unwrap();
        assert_eq!(duty.xun, Xun::JiaYin);
        assert_eq!(duty.leader, Stem::Gui);
        assert_eq!(duty.position, Palace::Gen);
        assert!(!duty.leader_lodged);
        assert_eq!(duty.star, Star::Ren);
        assert_eq!(duty.door, Door::Life);
        assert_eq!(duty.star_target, Palace::Kun);
        assert_eq!(duty.door_target, Palace::Kun);
    }

    #[test]
    fn jia_hour_uses_its_leader() {
        // 甲子 hour: leader 戊 is both the duty stem and the hour stem, and no
        // hours have elapsed, so nothing moves.
        let earth = plate(1, Dun::Yang, Palace::Kun);
        let duty = locate_duty(
            &pillars("甲子", "甲子"),
            &earth,
            Dun::Yang,
            &ChartConfig::default(),
            QimenTables::standard(),
        )
        .unwrap();
        assert_eq!(duty.hour_stem, Stem::Wu);
        assert_eq!(duty.position, Palace::Kan);
        assert_eq!(duty.star_target, Palace::Kan);
        assert_eq!(duty.door_target, Palace::Kan);
    }

    #[test]
    fn default_anchor_is_the_day_decade() {
        let earth = plate(5, Dun::Yang, Palace::Kun);
        let duty = locate_duty(
            &pillars("甲辰", "庚午"),
            &earth,
            Dun::Yang,
            &ChartConfig::default(),
            QimenTables::standard(),
        )
        .unwrap();
        assert_eq!(duty.xun, Xun::JiaChen);
        assert_eq!(duty.leader, Stem::Ren);
        assert_eq!(duty.position, Palace::Li);
        assert_eq!(duty.star, Star::Ying);
        assert_eq!(duty.door, Door::Scenery);
        // 辰 to 午 is two hours: 9 → 1 → 2.
        assert_eq!(duty.door_target, Palace::Kun);
    }

    #[test]
    fn door_start_for_a_lodged_leader() {
        let earth = plate(5, Dun::Yang, Palace::Kun);
        let p = pillars("甲辰", "庚午");
        let target = |door_start| {
            let config = ChartConfig {
                door_start,
                ..hour_anchor()
            };
            locate_duty(&p, &earth, Dun::Yang, &config, QimenTables::standard())
                .unwrap()
                .door_target
        };
        // 子 to 午 is six hours.
        assert_eq!(target(DoorStart::Leader), Palace::Kun);
        assert_eq!(target(DoorStart::DoorHome), Palace::Gen);
        assert_eq!(target(DoorStart::HourBranch), Palace::Li);
    }

    #[test]
    fn hour_branch_start_follows_the_branch_table() {
        let earth = plate(4, Dun::Yin, Palace::Gen);
        let config = ChartConfig {
            door_start: DoorStart::HourBranch,
            ..ChartConfig::default()
        };
        for (hour, palace) in [("庚申", Palace::Kun), ("丁丑", Palace::Gen), ("甲子", Palace::Kan)] {
            let duty = locate_duty(
                &pillars("癸酉", hour),
                &earth,
                Dun::Yin,
                &config,
                QimenTables::standard(),
            )
            .unwrap();
            assert_eq!(duty.door_target, palace, "{hour}");
        }
    }
}

//! Rotated layers: heaven plate, stars, doors and spirits.
//!
//! Stars and the heaven plate turn rigidly around the ring so the duty star
//! lands on the star target; each star carries the earth cell of its home
//! palace with it. Doors turn so the duty door lands on the door target.
//! Spirits are laid from the star target, one per palace.

use std::fmt::{Display, Formatter};

use qimen_base::{
    Door, Palace, PalaceGrid, QimenTables, RING, Spirit, Star, ring_offset, rotate_ring,
};

use crate::duty::DutyInfo;
use crate::earth::StemCell;
use crate::error::EngineError;

/// One palace of the star layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarCell {
    Single(Star),
    /// A ring star with the center star riding along.
    Converged(Star, Star),
}

impl StarCell {
    /// The ring star of the cell.
    pub const fn primary(&self) -> Star {
        match *self {
            Self::Single(s) | Self::Converged(s, _) => s,
        }
    }

    pub fn contains(&self, star: Star) -> bool {
        match *self {
            Self::Single(s) => s == star,
            Self::Converged(a, b) => a == star || b == star,
        }
    }

    pub fn stars(&self) -> impl Iterator<Item = Star> {
        let (a, b) = match *self {
            Self::Single(s) => (s, None),
            Self::Converged(s, c) => (s, Some(c)),
        };
        std::iter::once(a).chain(b)
    }

    pub const fn is_converged(&self) -> bool {
        matches!(self, Self::Converged(..))
    }
}

impl Display for StarCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(s) => write!(f, "{s}"),
            Self::Converged(s, c) => write!(f, "{s}{c}"),
        }
    }
}

fn offset(from: Palace, to: Palace) -> Result<i32, EngineError> {
    ring_offset(from, to)
        .map(|k| k as i32)
        .ok_or_else(|| EngineError::InvariantViolation(format!("rotation {from} → {to}")))
}

/// Ring steps that carry the duty star from its position to its target.
pub fn star_offset(duty: &DutyInfo) -> Result<i32, EngineError> {
    offset(duty.position, duty.star_target)
}

/// Heaven plate: every earth cell moved with its home star.
pub fn place_heaven(
    earth: &PalaceGrid<StemCell>,
    duty: &DutyInfo,
) -> Result<PalaceGrid<StemCell>, EngineError> {
    let k = star_offset(duty)?;
    Ok(earth.with_ring(rotate_ring(earth.ring(), k)))
}

/// Star layer: ring stars rotated, the center star riding with the host's star.
pub fn place_stars(
    earth: &PalaceGrid<StemCell>,
    duty: &DutyInfo,
    tables: &QimenTables,
) -> Result<PalaceGrid<StarCell>, EngineError> {
    let k = star_offset(duty)?;
    let host_star = tables.home_star(earth.host());
    let cells = tables.star_ring.map(|s| {
        if s == host_star {
            StarCell::Converged(s, tables.center_star)
        } else {
            StarCell::Single(s)
        }
    });
    Ok(earth.with_ring(rotate_ring(&cells, k)))
}

/// Door layer: home doors rotated so the duty door reaches the door target.
pub fn place_doors(
    earth: &PalaceGrid<StemCell>,
    duty: &DutyInfo,
    tables: &QimenTables,
) -> Result<PalaceGrid<Door>, EngineError> {
    let k = offset(duty.position, duty.door_target)?;
    Ok(earth.with_ring(rotate_ring(&tables.door_ring, k)))
}

/// Spirit layer: 值符 on the star target, the rest following the ring.
pub fn place_spirits(
    earth: &PalaceGrid<StemCell>,
    duty: &DutyInfo,
    clockwise: bool,
    tables: &QimenTables,
) -> Result<PalaceGrid<Spirit>, EngineError> {
    let start = duty.star_target.ring_index().ok_or_else(|| {
        EngineError::InvariantViolation(format!("star target {} is the center", duty.star_target))
    })?;
    let mut ring = tables.spirit_order;
    for (j, spirit) in tables.spirit_order.iter().enumerate() {
        let i = if clockwise {
            (start + j) % RING.len()
        } else {
            (start + RING.len() - j) % RING.len()
        };
        ring[i] = *spirit;
    }
    Ok(earth.with_ring(ring))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::duty::locate_duty;
    use crate::earth::place_earth;
    use qimen_base::{Dun, FourPillars, GanZhi, Ju, Stem};

    struct Layers {
        earth: PalaceGrid<StemCell>,
        duty: DutyInfo,
    }

    fn setup(ju: u8, dun: Dun, host: Palace, day: &str, hour: &str) -> Layers {
        let gz = |s| GanZhi::from_name(s).unwrap();
        let pillars = FourPillars {
            year: gz("甲子"),
            month: gz("丙寅"),
            day: gz(day),
            hour: gz(hour),
        };
        let tables = QimenTables::standard();
        let earth = place_earth(Ju::new(ju).unwrap(), dun, host, tables).unwrap();
        let duty = locate_duty(&pillars, &earth, dun, &ChartConfig::default(), tables).unwrap();
        Layers { earth, duty }
    }

    #[test]
    fn stars_follow_duty_and_qin_rides_host_star() {
        let l = setup(5, Dun::Yang, Palace::Kun, "甲辰", "庚午");
        let stars = place_stars(&l.earth, &l.duty, QimenTables::standard()).unwrap();
        assert_eq!(*stars.get(Palace::Dui), StarCell::Converged(Star::Rui, Star::Qin));
        assert_eq!(*stars.get(Palace::Kan), StarCell::Single(Star::Xin));
        assert_eq!(*stars.get(Palace::Kun), StarCell::Single(Star::Ying));
        let converged = stars.outer().filter(|(_, c)| c.is_converged()).count();
        assert_eq!(converged, 1);
    }

    #[test]
    fn heaven_carries_earth_cells() {
        let l = setup(5, Dun::Yang, Palace::Kun, "甲辰", "庚午");
        let heaven = place_heaven(&l.earth, &l.duty).unwrap();
        assert_eq!(heaven.get(Palace::Dui), l.earth.get(Palace::Kun));
        assert_eq!(heaven.get(Palace::Kan).primary, Stem::Ji);
        // Palace 5 still echoes the lodging host, not the star's new palace.
        assert_eq!(heaven.get(Palace::Center), heaven.get(Palace::Kun));
    }

    #[test]
    fn doors_reach_door_target() {
        let l = setup(4, Dun::Yin, Palace::Gen, "癸酉", "庚申");
        let doors = place_doors(&l.earth, &l.duty, QimenTables::standard()).unwrap();
        assert_eq!(*doors.get(Palace::Kun), Door::Life);
        assert_eq!(*doors.get(Palace::Li), Door::Rest);
        assert_eq!(*doors.get(Palace::Gen), Door::Death);
    }

    #[test]
    fn spirits_run_with_dun() {
        let l = setup(4, Dun::Yin, Palace::Gen, "癸酉", "庚申");
        let tables = QimenTables::standard();
        let ccw = place_spirits(&l.earth, &l.duty, false, tables).unwrap();
        assert_eq!(*ccw.get(Palace::Kun), Spirit::ZhiFu);
        assert_eq!(*ccw.get(Palace::Li), Spirit::TengShe);
        assert_eq!(*ccw.get(Palace::Xun), Spirit::TaiYin);
        let cw = place_spirits(&l.earth, &l.duty, true, tables).unwrap();
        assert_eq!(*cw.get(Palace::Kun), Spirit::ZhiFu);
        assert_eq!(*cw.get(Palace::Dui), Spirit::TengShe);
    }

    #[test]
    fn every_layer_is_a_permutation() {
        let tables = QimenTables::standard();
        for (day, hour) in [("甲辰", "庚午"), ("癸酉", "庚申"), ("甲子", "丙寅")] {
            for ju in 1..=9 {
                for (dun, host) in [(Dun::Yang, Palace::Kun), (Dun::Yin, Palace::Gen)] {
                    let l = setup(ju, dun, host, day, hour);
                    let doors = place_doors(&l.earth, &l.duty, tables).unwrap();
                    for door in tables.door_ring {
                        assert!(doors.ring().contains(&door));
                    }
                    let spirits = place_spirits(&l.earth, &l.duty, dun.is_yang(), tables).unwrap();
                    for spirit in tables.spirit_order {
                        assert!(spirits.ring().contains(&spirit));
                    }
                    let stars = place_stars(&l.earth, &l.duty, tables).unwrap();
                    assert!(stars.get(l.duty.star_target).contains(l.duty.star));
                }
            }
        }
    }
}

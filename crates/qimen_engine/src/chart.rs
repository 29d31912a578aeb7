//! The assembled chart and its structural checks.
//!
//! A [`Chart`] is only produced by [`Chart::assemble`], which validates every
//! layer first. Fields are private; the chart is read through accessors and
//! never mutated afterwards.

use qimen_base::{
    AuxiliaryInfo, Branch, CalendarInfo, Door, Dun, FourPillars, Ju, Palace, PalaceGrid,
    PeriodInfo, QimenTables, Spirit, Star, Stem, TermInfo, Xun, Yuan,
};
use qimen_time::CivilTime;

use crate::annotations::SideMarks;
use crate::config::ChartConfig;
use crate::duty::DutyInfo;
use crate::earth::{StemCell, StemLocation, locate_stem};
use crate::error::EngineError;
use crate::rotation::StarCell;

/// Which stem plate a lookup refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plate {
    Earth,
    Heaven,
}

/// Everything a chart shows in one palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalaceView {
    pub palace: Palace,
    /// Outer palace the values were read from (the host for palace 5).
    pub source: Palace,
    pub earth: StemCell,
    pub heaven: StemCell,
    pub star: StarCell,
    pub door: Door,
    pub spirit: Spirit,
    /// Star homed here on an unrotated chart.
    pub home_star: Star,
    /// Door homed here on an unrotated chart; none for the center.
    pub home_door: Option<Door>,
}

/// The layer grids of a chart, before assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    pub earth: PalaceGrid<StemCell>,
    pub heaven: PalaceGrid<StemCell>,
    pub stars: PalaceGrid<StarCell>,
    pub doors: PalaceGrid<Door>,
    pub spirits: PalaceGrid<Spirit>,
}

/// A complete, validated Qi Men Dun Jia chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    time: CivilTime,
    config: ChartConfig,
    calendar: CalendarInfo,
    period: PeriodInfo,
    duty: DutyInfo,
    layers: Layers,
    home_stars: [Star; 9],
    home_doors: [Option<Door>; 9],
    auxiliary: AuxiliaryInfo,
    tian_yi: Star,
    side_marks: SideMarks,
}

/// Parts handed to [`Chart::assemble`].
#[derive(Debug, Clone)]
pub struct ChartParts {
    pub time: CivilTime,
    pub config: ChartConfig,
    pub calendar: CalendarInfo,
    pub period: PeriodInfo,
    pub duty: DutyInfo,
    pub layers: Layers,
    pub auxiliary: AuxiliaryInfo,
    pub side_marks: SideMarks,
}

fn violation(msg: String) -> EngineError {
    tracing::error!(%msg, "chart invariant violated");
    EngineError::InvariantViolation(msg)
}

fn check_distinct<T: PartialEq + std::fmt::Debug>(
    layer: &str,
    items: impl Iterator<Item = T>,
) -> Result<(), EngineError> {
    let items: Vec<T> = items.collect();
    for (i, a) in items.iter().enumerate() {
        if items[i + 1..].contains(a) {
            return Err(violation(format!("{layer}: {a:?} on two palaces")));
        }
    }
    Ok(())
}

fn check_stem_plate(
    name: &str,
    plate: &PalaceGrid<StemCell>,
    expected_host: Palace,
) -> Result<(), EngineError> {
    check_distinct(name, plate.outer().flat_map(|(_, c)| c.stems()))?;
    let lodged = plate.outer().filter(|(_, c)| c.lodged.is_some()).count();
    if lodged != 1 {
        return Err(violation(format!("{name}: {lodged} lodged stems")));
    }
    if plate.host() != expected_host {
        return Err(violation(format!(
            "{name}: center lodges in {}, expected {expected_host}",
            plate.host()
        )));
    }
    Ok(())
}

impl Layers {
    /// Check every structural invariant of the five layers.
    pub fn validate(&self, tables: &QimenTables) -> Result<(), EngineError> {
        let host = self.earth.host();
        check_stem_plate("earth plate", &self.earth, host)?;
        check_stem_plate("heaven plate", &self.heaven, host)?;
        if self.earth.get(host).lodged.is_none() {
            return Err(violation(format!("earth plate: host {host} holds no lodged stem")));
        }

        check_distinct("stars", self.stars.outer().flat_map(|(_, c)| c.stars()))?;
        let converged: Vec<&StarCell> = self
            .stars
            .outer()
            .map(|(_, c)| c)
            .filter(|c| c.is_converged())
            .collect();
        match converged.as_slice() {
            [cell] if cell.contains(tables.center_star) => {}
            _ => {
                return Err(violation(format!(
                    "stars: {} converged cells",
                    converged.len()
                )));
            }
        }

        check_distinct("doors", self.doors.outer().map(|(_, d)| d))?;
        check_distinct("spirits", self.spirits.outer().map(|(_, s)| s))?;

        for (name, layer_host) in [
            ("stars", self.stars.host()),
            ("doors", self.doors.host()),
            ("spirits", self.spirits.host()),
        ] {
            if layer_host != host {
                return Err(violation(format!(
                    "{name}: center echoes {layer_host}, expected {host}"
                )));
            }
        }
        Ok(())
    }
}

impl Chart {
    /// Validate the layers and freeze them into a chart.
    pub fn assemble(parts: ChartParts, tables: &QimenTables) -> Result<Self, EngineError> {
        parts.layers.validate(tables)?;
        let host_palace = parts.layers.earth.host();
        if parts.duty.position.is_center() {
            return Err(violation("duty position is the center".into()));
        }
        if parts.duty.leader_lodged && parts.duty.position != host_palace {
            return Err(violation(format!(
                "lodged leader found in {}, host is {host_palace}",
                parts.duty.position
            )));
        }

        let tian_yi = parts.layers.stars.get(parts.duty.position).primary();
        let home_stars = qimen_base::ALL_PALACES.map(|p| tables.home_star(p));
        let home_doors = qimen_base::ALL_PALACES.map(|p| tables.home_door(p));

        Ok(Self {
            time: parts.time,
            config: parts.config,
            calendar: parts.calendar,
            period: parts.period,
            duty: parts.duty,
            layers: parts.layers,
            home_stars,
            home_doors,
            auxiliary: parts.auxiliary,
            tian_yi,
            side_marks: parts.side_marks,
        })
    }

    pub fn time(&self) -> &CivilTime {
        &self.time
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn pillars(&self) -> &FourPillars {
        &self.calendar.pillars
    }

    pub fn term(&self) -> &TermInfo {
        &self.calendar.term
    }

    pub fn solar_year(&self) -> i32 {
        self.calendar.solar_year
    }

    pub fn period(&self) -> &PeriodInfo {
        &self.period
    }

    pub fn dun(&self) -> Dun {
        self.period.dun
    }

    pub fn yuan(&self) -> Yuan {
        self.period.yuan
    }

    pub fn ju(&self) -> Ju {
        self.period.ju
    }

    pub fn xun(&self) -> Xun {
        self.duty.xun
    }

    pub fn duty(&self) -> &DutyInfo {
        &self.duty
    }

    pub fn earth(&self) -> &PalaceGrid<StemCell> {
        &self.layers.earth
    }

    pub fn heaven(&self) -> &PalaceGrid<StemCell> {
        &self.layers.heaven
    }

    pub fn stars(&self) -> &PalaceGrid<StarCell> {
        &self.layers.stars
    }

    pub fn doors(&self) -> &PalaceGrid<Door> {
        &self.layers.doors
    }

    pub fn spirits(&self) -> &PalaceGrid<Spirit> {
        &self.layers.spirits
    }

    /// Outer palace the center lodges in.
    pub fn host(&self) -> Palace {
        self.layers.earth.host()
    }

    pub fn auxiliary(&self) -> &AuxiliaryInfo {
        &self.auxiliary
    }

    pub fn day_void(&self) -> [Branch; 2] {
        self.auxiliary.day_void
    }

    pub fn hour_void(&self) -> [Branch; 2] {
        self.auxiliary.hour_void
    }

    /// Horse branch of the hour pillar.
    pub fn horse(&self) -> Branch {
        self.auxiliary.horse
    }

    pub fn day_horse(&self) -> Branch {
        self.auxiliary.day_horse
    }

    /// Tian Yi (天乙): the star now standing on the duty position.
    pub fn tian_yi(&self) -> Star {
        self.tian_yi
    }

    pub fn side_marks(&self) -> &SideMarks {
        &self.side_marks
    }

    /// All layers at one palace; palace 5 reads through its host.
    pub fn palace(&self, palace: Palace) -> PalaceView {
        let i = (palace.number() - 1) as usize;
        PalaceView {
            palace,
            source: if palace.is_center() {
                self.host()
            } else {
                palace
            },
            earth: *self.layers.earth.get(palace),
            heaven: *self.layers.heaven.get(palace),
            star: *self.layers.stars.get(palace),
            door: *self.layers.doors.get(palace),
            spirit: *self.layers.spirits.get(palace),
            home_star: self.home_stars[i],
            home_door: self.home_doors[i],
        }
    }

    /// All nine palaces in number order.
    pub fn palaces(&self) -> impl Iterator<Item = PalaceView> + '_ {
        qimen_base::ALL_PALACES.iter().map(|&p| self.palace(p))
    }

    /// Where a stem sits on a plate.
    pub fn find_stem(&self, plate: Plate, stem: Stem) -> Option<StemLocation> {
        match plate {
            Plate::Earth => locate_stem(&self.layers.earth, stem),
            Plate::Heaven => locate_stem(&self.layers.heaven, stem),
        }
    }

    /// Outer palace holding a star (禽 resolves to the palace it rides in).
    pub fn find_star(&self, star: Star) -> Option<Palace> {
        self.layers.stars.find(|c| c.contains(star))
    }

    pub fn find_door(&self, door: Door) -> Option<Palace> {
        self.layers.doors.find(|d| *d == door)
    }

    pub fn find_spirit(&self, spirit: Spirit) -> Option<Palace> {
        self.layers.spirits.find(|s| *s == spirit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_chart;
    use qimen_time::CivilTime;

    fn layers() -> Layers {
        let t = CivilTime::new(2025, 9, 1, 15, 0, 0).unwrap();
        let chart = compute_chart(&t, QimenTables::standard(), ChartConfig::default()).unwrap();
        chart.layers
    }

    #[test]
    fn computed_layers_validate() {
        layers().validate(QimenTables::standard()).unwrap();
    }

    #[test]
    fn duplicate_door_is_a_violation() {
        let mut l = layers();
        let mut ring = *l.doors.ring();
        ring[1] = ring[0];
        l.doors = l.doors.with_ring(ring);
        let err = l.validate(QimenTables::standard()).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }

    #[test]
    fn mismatched_host_is_a_violation() {
        let mut l = layers();
        assert_eq!(l.earth.host(), Palace::Gen);
        l.spirits = PalaceGrid::new(*l.spirits.ring(), Palace::Kun).unwrap();
        let err = l.validate(QimenTables::standard()).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }
}

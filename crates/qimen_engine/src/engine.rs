//! Chart pipeline: calendar, period, earth plate, duty, rotations, marks.

use qimen_base::{QimenTables, calendar_info, compute_auxiliary, select_period};
use qimen_time::CivilTime;
use tracing::debug;

use crate::annotations::{AnnotationInput, annotate};
use crate::chart::{Chart, ChartParts, Layers};
use crate::config::ChartConfig;
use crate::duty::locate_duty;
use crate::earth::place_earth;
use crate::error::EngineError;
use crate::rotation::{place_doors, place_heaven, place_spirits, place_stars};

/// Compute one chart for a civil timestamp.
///
/// The tables are trusted as given; use [`QimenEngine::new`] to validate
/// tables once before computing many charts.
pub fn compute_chart(
    time: &CivilTime,
    tables: &QimenTables,
    config: ChartConfig,
) -> Result<Chart, EngineError> {
    let calendar = calendar_info(time, config.zi_hour)?;
    let pillars = calendar.pillars;
    debug!(%time, %pillars, term = %calendar.term.term, "calendar");

    let period = select_period(
        &calendar.term,
        &time.date(),
        pillars.day,
        config.yuan_method,
        tables,
    )?;
    let host = config.lodging.host(period.dun);
    debug!(
        dun = %period.dun,
        yuan = %period.yuan,
        ju = %period.ju,
        elapsed = period.elapsed_days,
        %host,
        "period"
    );

    let earth = place_earth(period.ju, period.dun, host, tables)?;
    let duty = locate_duty(&pillars, &earth, period.dun, &config, tables)?;
    debug!(
        xun = %duty.xun,
        position = %duty.position,
        star = %duty.star,
        door = %duty.door,
        star_target = %duty.star_target,
        door_target = %duty.door_target,
        "duty"
    );

    let layers = Layers {
        heaven: place_heaven(&earth, &duty)?,
        stars: place_stars(&earth, &duty, tables)?,
        doors: place_doors(&earth, &duty, tables)?,
        spirits: place_spirits(
            &earth,
            &duty,
            config.spirit_direction.clockwise(period.dun),
            tables,
        )?,
        earth,
    };

    let auxiliary = compute_auxiliary(&pillars, tables);
    let side_marks = annotate(&AnnotationInput {
        earth: &layers.earth,
        heaven: &layers.heaven,
        month_branch: pillars.month.branch(),
        day_void: auxiliary.day_void,
        hour_void: auxiliary.hour_void,
        horse: auxiliary.horse,
    });
    debug!(marked = side_marks.iter().count(), "annotations");

    Chart::assemble(
        ChartParts {
            time: *time,
            config,
            calendar,
            period,
            duty,
            layers,
            auxiliary,
            side_marks,
        },
        tables,
    )
}

/// Chart engine bound to a validated set of tables.
///
/// `QimenEngine` is [`Send`] + [`Sync`] and holds no mutable state, so one
/// engine can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct QimenEngine<'t> {
    tables: &'t QimenTables,
    config: ChartConfig,
}

impl<'t> QimenEngine<'t> {
    /// Validate the tables and build an engine.
    pub fn new(tables: &'t QimenTables, config: ChartConfig) -> Result<Self, EngineError> {
        tables.validate()?;
        Ok(Self { tables, config })
    }

    pub fn tables(&self) -> &'t QimenTables {
        self.tables
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn compute_chart(&self, time: &CivilTime) -> Result<Chart, EngineError> {
        compute_chart(time, self.tables, self.config)
    }

    /// Compute charts for many timestamps. Failures are reported per entry.
    pub fn compute_batch(&self, times: &[CivilTime]) -> Vec<Result<Chart, EngineError>> {
        times.iter().map(|t| self.compute_chart(t)).collect()
    }
}

impl QimenEngine<'static> {
    /// Engine over the built-in tables.
    pub fn standard(config: ChartConfig) -> Self {
        Self {
            tables: QimenTables::standard(),
            config,
        }
    }
}

//! Qi Men Dun Jia chart construction.
//!
//! This crate provides:
//! - Earth-plate placement with center lodging
//! - Duty star / duty door lookup and the rotated heaven, star, door and
//!   spirit layers
//! - Side annotations around the twelve branches
//! - [`Chart`] assembly with structural validation
//!
//! ```rust,ignore
//! let time: CivilTime = "2024-02-10T12:00:00".parse()?;
//! let chart = compute_chart(&time, QimenTables::standard(), ChartConfig::default())?;
//! println!("{} {} {}", chart.dun(), chart.ju(), chart.duty().star);
//! ```

pub mod annotations;
pub mod chart;
pub mod config;
pub mod duty;
pub mod earth;
pub mod engine;
pub mod error;
pub mod rotation;

pub use annotations::{AnnotationInput, Mark, MarkKind, SideMarks, annotate};
pub use chart::{Chart, ChartParts, Layers, PalaceView, Plate};
pub use config::{
    ChartConfig, DoorStart, LodgingRule, SpiritDirection, XunAnchor, YuanMethod, ZiHourRule,
};
pub use duty::{DutyInfo, locate_duty};
pub use earth::{StemCell, StemLocation, locate_stem, place_earth};
pub use engine::{QimenEngine, compute_chart};
pub use error::EngineError;
pub use rotation::{StarCell, place_doors, place_heaven, place_spirits, place_stars, star_offset};

//! JSON configuration for the qimen chart engine.
//!
//! A configuration file holds optional replacement tables and optional chart
//! options:
//!
//! ```json
//! { "tables": { ... }, "chart": { "yuan_method": "fu_tou", "lodging": "always_kun" } }
//! ```
//!
//! Missing sections fall back to [`QimenTables::standard`] and
//! [`ChartConfig::default`]. A bare tables file (the layout of
//! `data/standard_tables.json`) is read with [`load_tables`].

pub mod error;
pub mod options;
pub mod tables;

use std::path::Path;

use qimen_base::QimenTables;
use qimen_engine::ChartConfig;
use serde::Deserialize;

pub use error::ConfigError;
pub use options::{
    ChartOptions, door_start_from_name, lodging_from_name, spirit_direction_from_name,
    xun_anchor_from_name, yuan_method_from_name, zi_hour_from_name,
};
pub use tables::TablesFile;

/// The built-in tables in file form.
pub const STANDARD_TABLES_JSON: &str = include_str!("../data/standard_tables.json");

/// A loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QimenConfig {
    pub tables: QimenTables,
    pub chart: ChartConfig,
}

impl Default for QimenConfig {
    fn default() -> Self {
        Self {
            tables: QimenTables::standard().clone(),
            chart: ChartConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    tables: Option<TablesFile>,
    #[serde(default)]
    chart: ChartOptions,
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a bare tables document.
pub fn parse_tables(json: &str) -> Result<QimenTables, ConfigError> {
    let file: TablesFile = serde_json::from_str(json)?;
    file.to_tables()
}

pub fn load_tables(path: &Path) -> Result<QimenTables, ConfigError> {
    let tables = parse_tables(&read(path)?)?;
    tracing::info!(path = %path.display(), "loaded tables");
    Ok(tables)
}

/// Parse a configuration document.
pub fn parse_config(json: &str) -> Result<QimenConfig, ConfigError> {
    let file: ConfigFile = serde_json::from_str(json)?;
    let tables = match &file.tables {
        Some(t) => t.to_tables()?,
        None => QimenTables::standard().clone(),
    };
    let chart = file.chart.apply(ChartConfig::default())?;
    tracing::debug!(?chart, custom_tables = file.tables.is_some(), "parsed config");
    Ok(QimenConfig { tables, chart })
}

pub fn load_config(path: &Path) -> Result<QimenConfig, ConfigError> {
    let config = parse_config(&read(path)?)?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

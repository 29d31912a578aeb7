//! JSON form of [`QimenTables`].
//!
//! Symbols are written by name (Chinese or pinyin) and ring tables are keyed
//! by palace number, so a file reads like the printed tables:
//!
//! ```json
//! { "yi_order": ["戊", "己", "庚", "辛", "壬", "癸", "丁", "丙", "乙"],
//!   "ju_table": { "冬至": [1, 7, 4], "...": [0, 0, 0] },
//!   "star_homes": { "1": "蓬", "...": "" }, "center_star": "禽",
//!   "door_homes": { "1": "休", "...": "" },
//!   "spirit_order": ["值符", "..."],
//!   "horse": { "子": "寅", "...": "" },
//!   "xun_leaders": { "甲子": "戊", "...": "" } }
//! ```

use std::collections::BTreeMap;
use std::fmt::Display;

use qimen_base::{
    ALL_BRANCHES, ALL_SOLAR_TERMS, Branch, Door, GanZhi, Palace, QimenTables, RING, SolarTerm,
    Spirit, Star, Stem, Xun,
};
use serde::Deserialize;

use crate::error::ConfigError;

/// Tables as they appear in a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TablesFile {
    pub yi_order: Vec<String>,
    pub ju_table: BTreeMap<String, [u8; 3]>,
    pub star_homes: BTreeMap<String, String>,
    pub center_star: String,
    pub door_homes: BTreeMap<String, String>,
    pub spirit_order: Vec<String>,
    pub horse: BTreeMap<String, String>,
    pub xun_leaders: BTreeMap<String, String>,
}

pub(crate) fn unknown(kind: &'static str, name: &str) -> ConfigError {
    ConfigError::UnknownName {
        kind,
        name: name.to_string(),
    }
}

fn symbol<T>(
    kind: &'static str,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    parse(name).ok_or_else(|| unknown(kind, name))
}

fn exact<T, const N: usize>(field: &'static str, items: Vec<T>) -> Result<[T; N], ConfigError> {
    items.try_into().map_err(|v: Vec<T>| ConfigError::WrongCount {
        field,
        expected: N,
        found: v.len(),
    })
}

fn symbols<T, const N: usize>(
    field: &'static str,
    names: &[String],
    parse: impl Fn(&str) -> Option<T>,
) -> Result<[T; N], ConfigError> {
    let parsed = names
        .iter()
        .map(|n| symbol(field, n, &parse))
        .collect::<Result<Vec<_>, _>>()?;
    exact(field, parsed)
}

/// Reorder a name-keyed map into `keys` order. Every key must appear once.
fn keyed<K, V, const N: usize>(
    field: &'static str,
    map: &BTreeMap<String, V>,
    keys: &[K; N],
    parse_key: impl Fn(&str) -> Option<K>,
) -> Result<[V; N], ConfigError>
where
    K: PartialEq + Display,
    V: Clone,
{
    let mut slots: [Option<V>; N] = std::array::from_fn(|_| None);
    for (name, value) in map {
        let i = parse_key(name)
            .and_then(|k| keys.iter().position(|x| *x == k))
            .ok_or_else(|| unknown(field, name))?;
        if slots[i].replace(value.clone()).is_some() {
            return Err(ConfigError::DuplicateEntry {
                field,
                key: name.clone(),
            });
        }
    }
    let mut out = Vec::with_capacity(N);
    for (key, slot) in keys.iter().zip(slots) {
        out.push(slot.ok_or_else(|| ConfigError::MissingEntry {
            field,
            key: key.to_string(),
        })?);
    }
    exact(field, out)
}

fn palace_key(s: &str) -> Option<Palace> {
    s.trim().parse().ok().and_then(Palace::from_number)
}

fn xun_key(s: &str) -> Option<Xun> {
    GanZhi::from_name(s).filter(|gz| gz.stem() == Stem::Jia).map(GanZhi::xun)
}

impl TablesFile {
    /// Resolve names and build validated tables.
    pub fn to_tables(&self) -> Result<QimenTables, ConfigError> {
        let tables = QimenTables {
            yi_order: symbols("yi_order", &self.yi_order, Stem::from_name)?,
            ju_table: keyed("ju_table", &self.ju_table, &ALL_SOLAR_TERMS, SolarTerm::from_name)?,
            star_ring: symbols(
                "star_homes",
                &keyed("star_homes", &self.star_homes, &RING, palace_key)?,
                Star::from_name,
            )?,
            center_star: symbol("center_star", &self.center_star, Star::from_name)?,
            door_ring: symbols(
                "door_homes",
                &keyed("door_homes", &self.door_homes, &RING, palace_key)?,
                Door::from_name,
            )?,
            spirit_order: symbols("spirit_order", &self.spirit_order, Spirit::from_name)?,
            horse: symbols(
                "horse",
                &keyed("horse", &self.horse, &ALL_BRANCHES, Branch::from_name)?,
                Branch::from_name,
            )?,
            xun_leaders: symbols(
                "xun_leaders",
                &keyed("xun_leaders", &self.xun_leaders, &Xun::ALL, xun_key)?,
                Stem::from_name,
            )?,
        };
        tables.validate()?;
        Ok(tables)
    }
}

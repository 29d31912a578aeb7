//! Chart options by name.
//!
//! Names are matched case-insensitively, with `-` and `_` interchangeable.

use qimen_engine::{
    ChartConfig, DoorStart, LodgingRule, SpiritDirection, XunAnchor, YuanMethod, ZiHourRule,
};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::tables::unknown;

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace('-', "_")
}

pub fn yuan_method_from_name(name: &str) -> Option<YuanMethod> {
    match normalize(name).as_str() {
        "elapsed" | "elapsed_days" => Some(YuanMethod::ElapsedDays),
        "fu_tou" | "futou" => Some(YuanMethod::FuTou),
        _ => None,
    }
}

pub fn xun_anchor_from_name(name: &str) -> Option<XunAnchor> {
    match normalize(name).as_str() {
        "hour" => Some(XunAnchor::Hour),
        "day" => Some(XunAnchor::Day),
        _ => None,
    }
}

pub fn door_start_from_name(name: &str) -> Option<DoorStart> {
    match normalize(name).as_str() {
        "leader" => Some(DoorStart::Leader),
        "door_home" | "home" => Some(DoorStart::DoorHome),
        "hour_branch" => Some(DoorStart::HourBranch),
        _ => None,
    }
}

pub fn lodging_from_name(name: &str) -> Option<LodgingRule> {
    match normalize(name).as_str() {
        "by_dun" => Some(LodgingRule::ByDun),
        "always_kun" | "kun" => Some(LodgingRule::AlwaysKun),
        _ => None,
    }
}

pub fn spirit_direction_from_name(name: &str) -> Option<SpiritDirection> {
    match normalize(name).as_str() {
        "follow_dun" => Some(SpiritDirection::FollowDun),
        "always_ascending" | "ascending" => Some(SpiritDirection::AlwaysAscending),
        _ => None,
    }
}

pub fn zi_hour_from_name(name: &str) -> Option<ZiHourRule> {
    match normalize(name).as_str() {
        "next_day" | "next_day_at_zi" => Some(ZiHourRule::NextDayAtZi),
        "split" | "split_at_midnight" => Some(ZiHourRule::SplitAtMidnight),
        _ => None,
    }
}

/// Chart options as they appear in a JSON file. Absent fields keep the
/// default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartOptions {
    pub yuan_method: Option<String>,
    pub xun_anchor: Option<String>,
    pub door_start: Option<String>,
    pub lodging: Option<String>,
    pub spirit_direction: Option<String>,
    pub zi_hour: Option<String>,
}

fn resolve<T>(
    kind: &'static str,
    name: Option<&String>,
    parse: fn(&str) -> Option<T>,
    default: T,
) -> Result<T, ConfigError> {
    match name {
        Some(n) => parse(n).ok_or_else(|| unknown(kind, n)),
        None => Ok(default),
    }
}

impl ChartOptions {
    /// Apply the named options on top of `base`.
    pub fn apply(&self, base: ChartConfig) -> Result<ChartConfig, ConfigError> {
        Ok(ChartConfig {
            yuan_method: resolve(
                "yuan_method",
                self.yuan_method.as_ref(),
                yuan_method_from_name,
                base.yuan_method,
            )?,
            xun_anchor: resolve(
                "xun_anchor",
                self.xun_anchor.as_ref(),
                xun_anchor_from_name,
                base.xun_anchor,
            )?,
            door_start: resolve(
                "door_start",
                self.door_start.as_ref(),
                door_start_from_name,
                base.door_start,
            )?,
            lodging: resolve(
                "lodging",
                self.lodging.as_ref(),
                lodging_from_name,
                base.lodging,
            )?,
            spirit_direction: resolve(
                "spirit_direction",
                self.spirit_direction.as_ref(),
                spirit_direction_from_name,
                base.spirit_direction,
            )?,
            zi_hour: resolve(
                "zi_hour",
                self.zi_hour.as_ref(),
                zi_hour_from_name,
                base.zi_hour,
            )?,
        })
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meters per second to units per hour, before the unit multiplier is applied
/// (3600 seconds / 1000 meters).
pub const MPS_TO_PER_HOUR: f64 = 3.6;

/// Kilometers to statute miles
pub const MILES_PER_KILOMETER: f64 = 0.621371;

pub const DEFAULT_HOUR_LABEL: &str = "h";

/// Distance unit selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn multiplier(self) -> f64 {
        match self {
            UnitSystem::Metric => 1.0,
            UnitSystem::Imperial => MILES_PER_KILOMETER,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "km" => Ok(UnitSystem::Metric),
            "imperial" | "mi" | "miles" => Ok(UnitSystem::Imperial),
            other => Err(format!("expected 'metric' or 'imperial', got '{}'", other)),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => f.write_str("metric"),
            UnitSystem::Imperial => f.write_str("imperial"),
        }
    }
}

/// The caller-supplied unit parameters every formatter needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayUnits {
    pub multiplier: f64,
    pub suffix: String,
    pub hour_label: String,
}

impl DisplayUnits {
    pub fn new(multiplier: f64, suffix: impl Into<String>, hour_label: impl Into<String>) -> Self {
        Self {
            multiplier,
            suffix: suffix.into(),
            hour_label: hour_label.into(),
        }
    }

    pub fn from_system(system: UnitSystem, hour_label: impl Into<String>) -> Self {
        Self::new(system.multiplier(), system.suffix(), hour_label)
    }

    /// Scale a speed in m/s to the display unit per hour
    pub fn per_hour(&self, meters_per_second: f64) -> f64 {
        meters_per_second * MPS_TO_PER_HOUR * self.multiplier
    }

    /// Average speed in the display unit per hour, zero when no time has elapsed
    pub fn average_per_hour(&self, distance_in_meters: f64, total_time_in_secs: i64) -> f64 {
        if total_time_in_secs <= 0 {
            return 0.0;
        }
        distance_in_meters * MPS_TO_PER_HOUR * self.multiplier / total_time_in_secs as f64
    }
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self::from_system(UnitSystem::Metric, DEFAULT_HOUR_LABEL)
    }
}

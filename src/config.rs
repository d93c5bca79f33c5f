use crate::error::ConfigError;
use crate::units::{DisplayUnits, UnitSystem, DEFAULT_HOUR_LABEL};
use std::path::PathBuf;

pub const STORAGE_ROOT_VAR: &str = "DISTANCECALC_STORAGE_ROOT";
pub const UNITS_VAR: &str = "DISTANCECALC_UNITS";
pub const HOUR_LABEL_VAR: &str = "DISTANCECALC_HOUR_LABEL";

/// Runtime configuration from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub storage_root: Option<PathBuf>,
    pub units: UnitSystem,
    pub hour_label: String,
}

impl Config {
    /// Load config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_root = lookup(STORAGE_ROOT_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let units = match lookup(UNITS_VAR) {
            Some(value) => value.parse::<UnitSystem>().map_err(|reason| ConfigError::Invalid {
                key: UNITS_VAR,
                value,
                reason,
            })?,
            None => UnitSystem::default(),
        };

        let hour_label = lookup(HOUR_LABEL_VAR).unwrap_or_else(|| DEFAULT_HOUR_LABEL.to_string());

        Ok(Self {
            storage_root,
            units,
            hour_label,
        })
    }

    pub fn display_units(&self) -> DisplayUnits {
        DisplayUnits::from_system(self.units, self.hour_label.clone())
    }

    /// Storage root, required for screenshot capture
    pub fn require_storage_root(&self) -> Result<&PathBuf, ConfigError> {
        self.storage_root
            .as_ref()
            .ok_or(ConfigError::Missing(STORAGE_ROOT_VAR))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_root: None,
            units: UnitSystem::default(),
            hour_label: DEFAULT_HOUR_LABEL.to_string(),
        }
    }
}

//! Sensor configuration file support.
//!
//! Reads the observer location and output time zone from a TOML file:
//!
//! ```toml
//! [observer]
//! latitude = 52.52
//! longitude = 13.405
//!
//! [display]
//! timezone = "local"   # or "utc", "+02:00"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use qtty::angular::Degrees;

use crate::error::{ConfigError, ConfigResult};
use crate::time::OutputZone;

pub const CONFIG_FILE_NAME: &str = "moon_phase.toml";

/// Moon phase configuration from file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonPhaseConfig {
    pub observer: ObserverSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Observer location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverSettings {
    pub latitude: f64,
    pub longitude: f64,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "local".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl MoonPhaseConfig {
    /// Configuration for a location with local-time output.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            observer: ObserverSettings {
                latitude,
                longitude,
            },
            display: DisplaySettings::default(),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(MoonPhaseConfig)` if the file was read, parsed and validated
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded moon phase config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        let config: MoonPhaseConfig =
            serde_path_to_error::deserialize(deserializer).map_err(|e| ConfigError::Parse {
                path: e.path().to_string(),
                message: e.inner().message().to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `moon_phase.toml` in:
    /// 1. Current directory
    /// 2. `moon_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> ConfigResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("moon_backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::Invalid(format!(
            "No {} found in standard locations",
            CONFIG_FILE_NAME
        )))
    }

    /// Check coordinate ranges and the time zone.
    pub fn validate(&self) -> ConfigResult<()> {
        let ObserverSettings {
            latitude,
            longitude,
        } = self.observer;

        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ConfigError::Invalid(format!(
                "observer.latitude must be within [-90, 90], got {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ConfigError::Invalid(format!(
                "observer.longitude must be within [-180, 180], got {}",
                longitude
            )));
        }
        self.zone()?;
        Ok(())
    }

    pub fn latitude(&self) -> Degrees {
        Degrees::new(self.observer.latitude)
    }

    pub fn longitude(&self) -> Degrees {
        Degrees::new(self.observer.longitude)
    }

    /// Output zone parsed from `display.timezone`.
    pub fn zone(&self) -> ConfigResult<OutputZone> {
        self.display
            .timezone
            .parse::<OutputZone>()
            .map_err(|e| ConfigError::Invalid(format!("display.timezone: {}", e)))
    }
}

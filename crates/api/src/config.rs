//! Service configuration
//!
//! Layered: built-in defaults, then an optional `config/telemetry.{toml,yaml,json}`,
//! then `TELEMETRY_*` environment variables (`__` separates nesting, e.g.
//! `TELEMETRY_CLEANER__MAX_SPEED=120`).

use config::{Config, ConfigError, Environment, File};
use data_validator::{CleanerConfig, DEFAULT_MOTOR_TEMP_ALERT};
use serde::{Deserialize, Serialize};

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/telemetry";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub log: LogSettings,
    pub cleaner: CleanerConfig,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// One of trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Motor temperature (°C) above which the readout raises an alert
    pub motor_temp_alert: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                bind_addr: "0.0.0.0:3000".to_string(),
            },
            log: LogSettings {
                level: "info".to_string(),
                json: false,
            },
            cleaner: CleanerConfig::default(),
            dashboard: DashboardSettings {
                motor_temp_alert: DEFAULT_MOTOR_TEMP_ALERT,
            },
        }
    }
}

impl Settings {
    /// Load from the default file location and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Some(DEFAULT_CONFIG_PATH))
    }

    /// Load with an optional config file; a missing file is not an error
    pub fn load_from(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("TELEMETRY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings
            .cleaner
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_from(Some("does/not/exist")).unwrap();
        assert_eq!(settings.cleaner, CleanerConfig::default());
        assert_eq!(settings.dashboard.motor_temp_alert, 90.0);
    }

    #[test]
    fn test_file_overrides() {
        let path = write_config(
            "telemetry-overrides",
            "[cleaner]\nmin_speed = 30.0\nmax_speed = 120.0\n\n[log]\nlevel = \"debug\"\njson = true\n",
        );
        let settings = Settings::load_from(path.to_str()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.cleaner.min_speed, 30.0);
        assert_eq!(settings.cleaner.max_speed, 120.0);
        assert_eq!(settings.log.level, "debug");
        assert!(settings.log.json);
    }

    #[test]
    fn test_inverted_speed_band_rejected() {
        let path = write_config(
            "telemetry-inverted",
            "[cleaner]\nmin_speed = 100.0\nmax_speed = 50.0\n",
        );
        let result = Settings::load_from(path.to_str());
        fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}

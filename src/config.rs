//! Configuration management for the host layer
//!
//! Loads runtime settings from a JSON file so telemetry sizing, log level
//! and driver render options can change without recompiling. Missing or
//! malformed files fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::HostError;

/// Highest reverb preset a driver may select (0 = reverb off).
pub const MAX_REVERB_PRESET: i32 = 4;

/// Highest reverb wet amount accepted by the engine.
pub const MAX_REVERB_WET: i32 = 32765;

/// Complete host configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub telemetry: TelemetryConfig,
    pub logging: LoggingConfig,
    pub render: RenderConfig,
}

/// Sizing of the diagnostic event collector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Broadcast channel capacity per subscriber
    pub channel_capacity: usize,
    /// Number of recent events kept for snapshots
    pub history_capacity: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            history_capacity: 64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level, `Info` when the string is not recognised.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Render options a driver passes through to the engine
///
/// The host never reads these itself; drivers call [`RenderConfig::validate`]
/// and [`RenderConfig::engine_preset`] before configuring reverb.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 0 = no reverb, 1 = large hall, 2 = hall, 3 = chamber, 4 = room
    pub reverb_preset: i32,
    /// Reverb wet amount, 0..=32765
    pub reverb_wet: i32,
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), HostError> {
        if !(0..=MAX_REVERB_PRESET).contains(&self.reverb_preset) {
            return Err(HostError::InvalidParameter {
                reason: format!("invalid reverb preset: {}", self.reverb_preset),
            });
        }
        if !(0..=MAX_REVERB_WET).contains(&self.reverb_wet) {
            return Err(HostError::InvalidParameter {
                reason: format!("invalid reverb amount: {}", self.reverb_wet),
            });
        }
        Ok(())
    }

    /// Engine preset index, or `None` when reverb should be bypassed.
    pub fn engine_preset(&self) -> Option<i32> {
        (self.reverb_preset > 0).then(|| self.reverb_preset - 1)
    }
}

impl HostConfig {
    /// Load configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file is missing or
    /// its JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        Self::load_from_file("assets/host_config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = HostConfig::default();
        assert_eq!(config.telemetry.channel_capacity, 256);
        assert_eq!(config.telemetry.history_capacity, 64);
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Info);
        assert_eq!(config.render.reverb_preset, 0);
        assert!(config.render.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = HostConfig::default();
        config.render.reverb_wet = 12000;
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: HostConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.render.reverb_wet, 12000);
        assert_eq!(
            parsed.telemetry.history_capacity,
            config.telemetry.history_capacity
        );
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let parsed: HostConfig =
            serde_json::from_str(r#"{ "logging": { "level": "debug" } }"#).unwrap();
        assert_eq!(parsed.logging.level_filter(), log::LevelFilter::Debug);
        assert_eq!(parsed.telemetry.channel_capacity, 256);
    }

    #[test]
    fn test_load_falls_back_on_bad_input() {
        let config = HostConfig::load_from_file("/nonexistent/host_config.json");
        assert_eq!(config.telemetry.history_capacity, 64);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let config = HostConfig::load_from_file(file.path());
        assert_eq!(config.telemetry.channel_capacity, 256);
    }

    #[test]
    fn test_render_validation() {
        let render = RenderConfig {
            reverb_preset: 5,
            reverb_wet: 0,
        };
        assert!(matches!(
            render.validate(),
            Err(HostError::InvalidParameter { .. })
        ));

        let render = RenderConfig {
            reverb_preset: 2,
            reverb_wet: 32766,
        };
        assert!(render.validate().is_err());

        let render = RenderConfig {
            reverb_preset: 2,
            reverb_wet: 32765,
        };
        assert!(render.validate().is_ok());
        assert_eq!(render.engine_preset(), Some(1));
        assert_eq!(RenderConfig::default().engine_preset(), None);
    }
}

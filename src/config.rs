//! Configuration management for flightlog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Whether threshold crossings open and close sessions at startup (default: off)
    #[serde(default)]
    pub automatic_mode: bool,

    /// Ground speed in knots at or above which the threshold is reached (default: 40)
    #[serde(default = "default_threshold_knots")]
    pub threshold_knots: f64,

    /// Knots below the threshold the speed must fall before it counts as missed (default: 5)
    #[serde(default = "default_hysteresis_knots")]
    pub hysteresis_knots: f64,

    /// Speed change per Up/Down key press in knots (default: 5)
    #[serde(default = "default_speed_step_knots")]
    pub speed_step_knots: f64,

    /// Maximum entries kept in the session journal (default: 1000)
    #[serde(default = "default_journal_capacity")]
    pub journal_capacity: usize,

    /// Event poll interval in milliseconds (default: 100)
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Diagnostic log retention in days (default: 7)
    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u64,
}

fn default_threshold_knots() -> f64 {
    40.0
}

fn default_hysteresis_knots() -> f64 {
    5.0
}

fn default_speed_step_knots() -> f64 {
    5.0
}

fn default_journal_capacity() -> usize {
    1000
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_log_retention_days() -> u64 {
    crate::logging::DEFAULT_RETENTION_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            automatic_mode: false,
            threshold_knots: default_threshold_knots(),
            hysteresis_knots: default_hysteresis_knots(),
            speed_step_knots: default_speed_step_knots(),
            journal_capacity: default_journal_capacity(),
            tick_rate_ms: default_tick_rate_ms(),
            log_retention_days: default_log_retention_days(),
        }
    }
}

impl Config {
    /// Load configuration from the default file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Check that the values describe a usable threshold and journal
    pub fn validate(&self) -> Result<()> {
        if !self.threshold_knots.is_finite() || self.threshold_knots <= 0.0 {
            anyhow::bail!(
                "threshold_knots must be positive, got {}",
                self.threshold_knots
            );
        }
        if !self.hysteresis_knots.is_finite()
            || self.hysteresis_knots < 0.0
            || self.hysteresis_knots >= self.threshold_knots
        {
            anyhow::bail!(
                "hysteresis_knots must be at least 0 and below threshold_knots, got {}",
                self.hysteresis_knots
            );
        }
        if !self.speed_step_knots.is_finite() || self.speed_step_knots <= 0.0 {
            anyhow::bail!(
                "speed_step_knots must be positive, got {}",
                self.speed_step_knots
            );
        }
        if self.journal_capacity == 0 {
            anyhow::bail!("journal_capacity must be at least 1");
        }
        if self.log_retention_days == 0 {
            anyhow::bail!("log_retention_days must be at least 1");
        }
        Ok(())
    }
}

/// Get the base configuration directory (~/.flightlog)
/// Falls back to ./.flightlog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".flightlog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".flightlog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Ensure all required directories exist
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(config_dir()).context("Failed to create config directory")?;
    std::fs::create_dir_all(logs_dir()).context("Failed to create logs directory")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.automatic_mode);
        assert_eq!(config.threshold_knots, 40.0);
        assert_eq!(config.hysteresis_knots, 5.0);
        assert_eq!(config.journal_capacity, 1000);
        assert_eq!(config.log_retention_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.automatic_mode = true;
        config.threshold_knots = 55.5;

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: Config = toml::from_str("automatic_mode = true\n").unwrap();
        assert!(parsed.automatic_mode);
        assert_eq!(parsed.threshold_knots, 40.0);
        assert_eq!(parsed.tick_rate_ms, 100);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.threshold_knots = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.hysteresis_knots = 40.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.hysteresis_knots = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.speed_step_knots = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.journal_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_retention_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_zero_retention() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "log_retention_days = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "log_retention_days = 1\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().log_retention_days, 1);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.automatic_mode = true;
        config.speed_step_knots = 10.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "threshold_knots = -3.0\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "not toml at all [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_config_dir_does_not_panic() {
        let dir = config_dir();
        assert!(dir.ends_with(".flightlog"));
    }

    #[test]
    fn test_try_config_dir() {
        if let Some(path) = try_config_dir() {
            assert!(path.ends_with(".flightlog"));
        }
    }
}

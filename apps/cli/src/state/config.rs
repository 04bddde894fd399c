//! # Application Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file: `--config <path>` / `TALLY_CONFIG` (resolved by the
//!    argument parser), else `<platform config dir>/tally.toml`
//! 3. Environment variables (`TALLY_*`)
//!
//! ## File Format
//! ```toml
//! [worker]
//! poll_interval_ms = 500
//! join_timeout_ms = 1000
//!
//! [storage]
//! orders_path = "data/orders.json"
//!
//! [logging]
//! log_path = "logs/app.log"
//! filter = "info"
//!
//! [display]
//! result_wait_ms = 250
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tally_engine::{EngineError, WorkerConfig};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<EngineError> for ConfigError {
    fn from(err: EngineError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Where orders are saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub orders_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            orders_path: PathBuf::from("data/orders.json"),
        }
    }
}

/// Log file and filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub log_path: PathBuf,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            log_path: PathBuf::from("logs/app.log"),
            filter: "info".to_string(),
        }
    }
}

/// Terminal display behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// How long "calculate" waits for the worker before returning without
    /// a result (milliseconds).
    pub result_wait_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings { result_wait_ms: 250 }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub worker: WorkerConfig,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error. An explicit path that exists but
    /// cannot be read or parsed is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config, falling back to defaults if loading fails.
    ///
    /// The error is handed back instead of logged, since logging itself is
    /// configured from the result.
    pub fn load_or_default(config_path: Option<PathBuf>) -> (Self, Option<ConfigError>) {
        match Self::load(config_path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Parses a TOML file. Missing sections and keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.worker.validate()?;

        if self.storage.orders_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("orders_path must not be empty".into()));
        }

        if self.logging.log_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("log_path must not be empty".into()));
        }

        Ok(())
    }

    /// Returns how long "calculate" waits for a fresh result.
    pub fn result_wait(&self) -> Duration {
        Duration::from_millis(self.display.result_wait_ms)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `TALLY_*` overrides from `lookup`. Unparseable numbers are
    /// ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("TALLY_ORDERS_PATH") {
            debug!(path = %path, "Overriding orders path from environment");
            self.storage.orders_path = PathBuf::from(path);
        }

        if let Some(path) = lookup("TALLY_LOG_PATH") {
            self.logging.log_path = PathBuf::from(path);
        }

        if let Some(filter) = lookup("TALLY_LOG_FILTER") {
            self.logging.filter = filter;
        }

        let millis = |key: &str| -> Option<u64> {
            let raw = lookup(key)?;
            match raw.trim().parse::<u64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(key, value = %raw, "Ignoring non-numeric environment override");
                    None
                }
            }
        };

        if let Some(ms) = millis("TALLY_POLL_INTERVAL_MS") {
            self.worker.poll_interval_ms = ms;
        }

        if let Some(ms) = millis("TALLY_JOIN_TIMEOUT_MS") {
            self.worker.join_timeout_ms = ms;
        }

        if let Some(ms) = millis("TALLY_RESULT_WAIT_MS") {
            self.display.result_wait_ms = ms;
        }
    }

    /// Returns the platform config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join("tally.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.orders_path, PathBuf::from("data/orders.json"));
        assert_eq!(config.logging.log_path, PathBuf::from("logs/app.log"));
        assert_eq!(config.logging.filter, "info");
        assert_eq!(config.result_wait(), Duration::from_millis(250));
        assert_eq!(config.worker.join_timeout_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[worker]\npoll_interval_ms = 50\n\n[storage]\norders_path = \"x.json\"").unwrap();

        let config = AppConfig::from_file(&path).unwrap();

        assert_eq!(config.worker.poll_interval_ms, 50);
        assert_eq!(config.worker.join_timeout_ms, 1000);
        assert_eq!(config.storage.orders_path, PathBuf::from("x.json"));
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_missing_explicit_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(config, Err(ConfigError::Read { .. })));

        let (loaded, error) = AppConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(loaded.storage, StorageSettings::default());
        assert!(error.is_none());
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "[worker\npoll_interval_ms = ").unwrap();

        assert!(matches!(AppConfig::from_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides_apply_and_skip_garbage() {
        let vars: HashMap<&str, &str> = [
            ("TALLY_ORDERS_PATH", "/tmp/o.json"),
            ("TALLY_LOG_FILTER", "debug"),
            ("TALLY_POLL_INTERVAL_MS", "100"),
            ("TALLY_JOIN_TIMEOUT_MS", "soon"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.storage.orders_path, PathBuf::from("/tmp/o.json"));
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.worker.poll_interval_ms, 100);
        assert_eq!(config.worker.join_timeout_ms, 1000);
    }

    #[test]
    fn test_load_or_default_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "[display]\nresult_wait_ms = \"slow\"").unwrap();

        let (config, error) = AppConfig::load_or_default(Some(path));

        assert_eq!(config.display, DisplaySettings::default());
        assert!(matches!(error, Some(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_poll_interval_is_invalid() {
        let mut config = AppConfig::default();
        config.worker.poll_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}

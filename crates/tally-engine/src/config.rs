//! # Worker Configuration
//!
//! Timing knobs for the calculation worker.
//!
//! ## Configuration File Format
//! ```toml
//! [worker]
//! poll_interval_ms = 500   # how long one wait on the task channel may last
//! join_timeout_ms = 1000   # how long shutdown waits for the worker to exit
//! ```
//!
//! The surrounding file and environment handling lives in the application;
//! this type only owns defaults and validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

fn default_poll_interval() -> u64 {
    500
}

fn default_join_timeout() -> u64 {
    1000
}

/// Worker timing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Upper bound of a single wait for the next task (milliseconds).
    ///
    /// The worker checks the cancellation flag every time a wait runs out,
    /// so this is also the worst-case delay between setting the flag and
    /// the worker noticing it when no `Stop` task arrives.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Upper bound for joining the worker on shutdown (milliseconds).
    #[serde(default = "default_join_timeout")]
    pub join_timeout_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            poll_interval_ms: default_poll_interval(),
            join_timeout_ms: default_join_timeout(),
        }
    }
}

impl WorkerConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "poll_interval_ms must be greater than 0".into(),
            ));
        }

        if self.join_timeout_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "join_timeout_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Returns the poll interval.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Returns the join timeout.
    pub fn join_timeout(&self) -> Duration {
        Duration::from_millis(self.join_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorkerConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.join_timeout(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = WorkerConfig::default();

        config.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        config.poll_interval_ms = 100;
        config.join_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: WorkerConfig = toml::from_str("poll_interval_ms = 50").unwrap();
        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.join_timeout_ms, 1000);
    }
}

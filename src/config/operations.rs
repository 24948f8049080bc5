//! Config loading, validation, and conversion operations.

use super::model::Config;
use crate::duration::parse_duration;
use crate::error::{JoblockError, Result};
use crate::locks::LockConfig;
use chrono::Duration;
use std::net::SocketAddr;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(JoblockError::ConfigError)` - Read, parse, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            JoblockError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| JoblockError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            JoblockError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `listen` must be a socket address (`host:port`)
    /// - `default_ttl` must be a positive duration
    /// - `grace_period` must be a duration (zero disables the grace window)
    /// - `log_level` must be non-empty
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;

        if self.ttl()? <= Duration::zero() {
            return Err(JoblockError::ConfigError(
                "config validation failed: default_ttl must be greater than 0".to_string(),
            ));
        }

        self.grace()?;

        if self.log_level.trim().is_empty() {
            return Err(JoblockError::ConfigError(
                "config validation failed: log_level must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Parsed listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            JoblockError::ConfigError(format!(
                "config validation failed: listen '{}' is not a socket address (expected host:port)",
                self.listen
            ))
        })
    }

    /// Parsed default TTL.
    pub fn ttl(&self) -> Result<Duration> {
        parse_config_duration("default_ttl", &self.default_ttl)
    }

    /// Parsed grace period.
    pub fn grace(&self) -> Result<Duration> {
        parse_config_duration("grace_period", &self.grace_period)
    }

    /// Timing for the lock manager.
    pub fn lock_config(&self) -> Result<LockConfig> {
        Ok(LockConfig::default()
            .with_ttl(self.ttl()?)
            .with_grace_period(self.grace()?))
    }
}

fn parse_config_duration(field: &str, value: &str) -> Result<Duration> {
    parse_duration(value).ok_or_else(|| {
        JoblockError::ConfigError(format!(
            "config validation failed: {} '{}' is not a duration (e.g. 30s, 1m30s, 500ms)",
            field, value
        ))
    })
}

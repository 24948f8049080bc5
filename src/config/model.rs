//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the joblock service.
///
/// Loaded from an optional YAML file; command-line flags override individual
/// fields. Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Server settings
    // =========================================================================
    /// Socket address to listen on (default: "0.0.0.0:8080").
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Log filter directive, e.g. "info" or "joblock=debug" (default: "info").
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    // =========================================================================
    // Lock settings
    // =========================================================================
    /// TTL applied when a request omits one (default: "30s").
    #[serde(default = "default_ttl")]
    pub default_ttl: String,

    /// Window after expiry during which only the holder may renew (default: "5s").
    #[serde(default = "default_grace_period")]
    pub grace_period: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            log_level: default_log_level(),
            default_ttl: default_ttl(),
            grace_period: default_grace_period(),
        }
    }
}

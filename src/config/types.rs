//! Configuration defaults for joblock.

use crate::locks::{DEFAULT_GRACE_PERIOD_SECS, DEFAULT_TTL_SECS};

/// Address the service binds when none is configured.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// Log filter used when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Default value functions for serde
pub(crate) fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}
pub(crate) fn default_ttl() -> String {
    format!("{}s", DEFAULT_TTL_SECS)
}
pub(crate) fn default_grace_period() -> String {
    format!("{}s", DEFAULT_GRACE_PERIOD_SECS)
}
pub(crate) fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

//! Configuration model for joblock.
//!
//! This module defines the Config struct that represents the optional
//! `joblock.yaml` service configuration. It supports forward-compatible YAML
//! parsing (unknown fields are ignored), defaults for every field, and
//! validation of addresses and durations.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::{DEFAULT_LISTEN, DEFAULT_LOG_LEVEL};

//! Error types for the joblock CLI and server.
//!
//! Lock contention is not an error: the lock core reports every outcome as a
//! result value. These errors cover configuration and serving.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for joblock operations.
#[derive(Error, Debug)]
pub enum JoblockError {
    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The HTTP server could not start or stopped abnormally.
    #[error("Server error: {0}")]
    ServerError(String),
}

impl JoblockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            JoblockError::UserError(_) => exit_codes::USER_ERROR,
            JoblockError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            JoblockError::ServerError(_) => exit_codes::SERVER_FAILURE,
        }
    }
}

/// Result type alias for joblock operations.
pub type Result<T> = std::result::Result<T, JoblockError>;

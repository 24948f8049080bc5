//! Exit code constants for the joblock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args or flag values)
//! - 2: Configuration failure (unreadable or invalid config file)
//! - 3: Server failure (bind, runtime, or serve error)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or flag values.
pub const USER_ERROR: i32 = 1;

/// Configuration failure: config file missing, unparseable, or invalid.
pub const CONFIG_FAILURE: i32 = 2;

/// Server failure: listener could not bind or the server stopped with an error.
pub const SERVER_FAILURE: i32 = 3;

//! Locking subsystem for joblock.
//!
//! This module implements the in-memory advisory lock model:
//! - One [`LockState`] per job name, holding at most one [`Lease`]
//! - A [`LockManager`] that creates job states lazily and routes calls to them
//!
//! # Lease Lifecycle
//!
//! A lease is *fresh* until `expires_at`, then in *grace* until `grace_until`,
//! then *lapsed*. Only the holder may renew during grace; once lapsed, any
//! client may take the lock and the outcome names the previous holder.
//! Phases are derived from the clock at call time; nothing runs in the
//! background.
//!
//! # Locking Discipline
//!
//! The manager's registry guards only the name-to-state map. Each state has
//! its own mutex, so calls on different jobs never contend.

mod lease;
mod manager;
mod message;
mod registry;
mod state;
mod types;


// Re-export public API
pub use lease::{Lease, LeasePhase};
pub use manager::LockManager;
pub use message::LockMessage;
pub use registry::{JobRegistry, RwLockRegistry};
pub use state::LockState;
pub use types::{
    AcquireResult, DEFAULT_GRACE_PERIOD_SECS, DEFAULT_TTL_SECS, LockConfig, ReleaseResult,
    StatusResult,
};

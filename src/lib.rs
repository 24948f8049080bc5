//! Joblock: minimal in-memory advisory lock service.
//!
//! The [`locks`] module holds the lock model and is usable on its own by any
//! embedding program; [`http`] exposes it over a small JSON API.
//!
//! ```
//! use chrono::Duration;
//! use joblock::locks::{LockManager, LockMessage};
//!
//! let manager = LockManager::new();
//! let first = manager.acquire("nightly-backup", "host-a", Duration::seconds(30));
//! assert_eq!(first.message, LockMessage::Acquired);
//!
//! let second = manager.acquire("nightly-backup", "host-b", Duration::seconds(30));
//! assert_eq!(second.message, LockMessage::HeldByAnother);
//! ```

pub mod config;
pub mod duration;
pub mod error;
pub mod exit_codes;
pub mod http;
pub mod locks;
pub mod telemetry;

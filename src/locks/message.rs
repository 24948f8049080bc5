//! Outcome messages for lock operations.
//!
//! The rendered text is part of the service's wire contract: front ends map
//! these values to status codes and clients match on them.

use std::fmt;

/// Closed set of outcomes reported by acquire and release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockMessage {
    /// Lock was free and is now held by the caller.
    Acquired,
    /// Lock was reclaimed from a holder whose grace period had elapsed.
    AcquiredFrom(String),
    /// Current holder extended its claim.
    Renewed,
    /// Another client holds an unexpired claim.
    HeldByAnother,
    /// Claim expired but its holder may still renew.
    GracePeriodActive,
    /// Holder released the lock.
    Released,
    /// Release attempted by a client that is not the holder.
    NotHolder,
}

impl LockMessage {
    /// Whether this outcome is a contention failure on acquire.
    pub fn is_conflict(&self) -> bool {
        matches!(self, LockMessage::HeldByAnother | LockMessage::GracePeriodActive)
    }
}

impl fmt::Display for LockMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockMessage::Acquired => write!(f, "acquired"),
            LockMessage::AcquiredFrom(previous) => write!(f, "acquired from {}", previous),
            LockMessage::Renewed => write!(f, "renewed"),
            LockMessage::HeldByAnother => write!(f, "held by another client"),
            LockMessage::GracePeriodActive => write!(f, "grace period active"),
            LockMessage::Released => write!(f, "lock released"),
            LockMessage::NotHolder => write!(f, "client does not hold the lock"),
        }
    }
}

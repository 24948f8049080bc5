//! Lock configuration and operation result types.

use super::message::LockMessage;
use chrono::{DateTime, Duration, Utc};

/// Default time a claim stays valid after acquisition or renewal.
pub const DEFAULT_TTL_SECS: i64 = 30;

/// Default window after expiry during which only the holder may renew.
pub const DEFAULT_GRACE_PERIOD_SECS: i64 = 5;

/// Timing applied to lock states at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockConfig {
    /// TTL used when a caller does not supply one.
    pub ttl: Duration,

    /// Grace window appended to every expiry. Never negative.
    pub grace_period: Duration,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
            grace_period: Duration::seconds(DEFAULT_GRACE_PERIOD_SECS),
        }
    }
}

impl LockConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Override the grace period. Negative values are clamped to zero.
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period.max(Duration::zero());
        self
    }
}

/// Outcome of an acquire or renew attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireResult {
    pub success: bool,
    pub job: String,

    /// Holder after the call: the caller on success, the blocking client on conflict.
    pub holder: String,

    pub message: LockMessage,
    pub expires_at: DateTime<Utc>,

    /// Set on success and on grace-period conflicts.
    pub grace_until: Option<DateTime<Utc>>,
}

/// Outcome of a release attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseResult {
    pub success: bool,
    pub job: String,
    pub message: LockMessage,

    /// How long the released lease was held. Diagnostic only.
    pub held_for: Option<Duration>,
}

/// Read-only snapshot of a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResult {
    pub job: String,
    pub holder: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub grace_until: Option<DateTime<Utc>>,

    /// True when unheld or at/after `expires_at`.
    pub is_expired: bool,

    /// True between `expires_at` (inclusive) and `grace_until` (exclusive).
    pub in_grace: bool,
}

impl StatusResult {
    pub fn is_held(&self) -> bool {
        self.holder.is_some()
    }
}

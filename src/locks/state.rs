//! Per-job lock state machine.

use super::lease::{Lease, LeasePhase};
use super::message::LockMessage;
use super::types::{AcquireResult, LockConfig, ReleaseResult, StatusResult};
use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// State of a single named lock.
///
/// Every operation runs under the state's own mutex and decides purely from
/// the stored lease and the clock reading taken while the mutex is held.
/// Expiry is never swept in the background: a lease moves from fresh to
/// grace to lapsed only as observed by the next call.
#[derive(Debug)]
pub struct LockState {
    job: String,
    config: LockConfig,
    lease: Mutex<Option<Lease>>,
}

impl LockState {
    /// Create an unheld lock with default timing.
    pub fn new(job: impl Into<String>) -> Self {
        Self::with_config(job, LockConfig::default())
    }

    /// Create an unheld lock with the given timing.
    pub fn with_config(job: impl Into<String>, config: LockConfig) -> Self {
        Self {
            job: job.into(),
            config: config.with_grace_period(config.grace_period),
            lease: Mutex::new(None),
        }
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    pub fn grace_period(&self) -> Duration {
        self.config.grace_period
    }

    /// Acquire or renew the lock for `client`.
    ///
    /// Decision order:
    /// 1. `client` already holds it (in any phase): renew.
    /// 2. Another holder's lease is fresh: `held by another client`.
    /// 3. Another holder's lease is in grace: `grace period active`.
    /// 4. Otherwise take it, reporting the previous holder if one lapsed.
    pub fn acquire(&self, client: &str, ttl: Duration) -> AcquireResult {
        let mut slot = self.lock();
        self.acquire_locked(&mut slot, client, ttl, Utc::now())
    }

    /// [`acquire`](Self::acquire) evaluated at an explicit instant.
    pub fn acquire_at(&self, client: &str, ttl: Duration, now: DateTime<Utc>) -> AcquireResult {
        let mut slot = self.lock();
        self.acquire_locked(&mut slot, client, ttl, now)
    }

    /// Release the lock if `client` holds it.
    pub fn release(&self, client: &str) -> ReleaseResult {
        let mut slot = self.lock();
        self.release_locked(&mut slot, client, Utc::now())
    }

    /// [`release`](Self::release) evaluated at an explicit instant.
    pub fn release_at(&self, client: &str, now: DateTime<Utc>) -> ReleaseResult {
        let mut slot = self.lock();
        self.release_locked(&mut slot, client, now)
    }

    /// Snapshot the lock without changing it.
    pub fn status(&self) -> StatusResult {
        let slot = self.lock();
        self.status_locked(&slot, Utc::now())
    }

    /// [`status`](Self::status) evaluated at an explicit instant.
    pub fn status_at(&self, now: DateTime<Utc>) -> StatusResult {
        let slot = self.lock();
        self.status_locked(&slot, now)
    }

    // Critical sections never leave the lease half-updated, so a poisoned
    // mutex still guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, Option<Lease>> {
        self.lease.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn acquire_locked(
        &self,
        slot: &mut Option<Lease>,
        client: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> AcquireResult {
        let grace_period = self.config.grace_period;

        let previous = match slot.as_mut() {
            Some(lease) if lease.holder == client => {
                lease.renew(now, ttl, grace_period);
                return self.granted(lease, LockMessage::Renewed);
            }
            Some(lease) => match lease.phase(now) {
                LeasePhase::Fresh => return self.rejected(lease, LockMessage::HeldByAnother),
                LeasePhase::Grace => return self.rejected(lease, LockMessage::GracePeriodActive),
                LeasePhase::Lapsed => Some(lease.holder.clone()),
            },
            None => None,
        };

        let lease = slot.insert(Lease::new(client, now, ttl, grace_period));
        let message = match previous {
            Some(previous) => LockMessage::AcquiredFrom(previous),
            None => LockMessage::Acquired,
        };
        self.granted(lease, message)
    }

    fn release_locked(
        &self,
        slot: &mut Option<Lease>,
        client: &str,
        now: DateTime<Utc>,
    ) -> ReleaseResult {
        match slot.take_if(|lease| lease.holder == client) {
            Some(lease) => ReleaseResult {
                success: true,
                job: self.job.clone(),
                message: LockMessage::Released,
                held_for: Some(lease.held_for(now)),
            },
            None => ReleaseResult {
                success: false,
                job: self.job.clone(),
                message: LockMessage::NotHolder,
                held_for: None,
            },
        }
    }

    fn status_locked(&self, slot: &Option<Lease>, now: DateTime<Utc>) -> StatusResult {
        match slot {
            Some(lease) => StatusResult {
                job: self.job.clone(),
                holder: Some(lease.holder.clone()),
                expires_at: Some(lease.expires_at),
                grace_until: Some(lease.grace_until),
                is_expired: lease.is_expired(now),
                in_grace: lease.in_grace(now),
            },
            None => StatusResult {
                job: self.job.clone(),
                holder: None,
                expires_at: None,
                grace_until: None,
                is_expired: true,
                in_grace: false,
            },
        }
    }

    fn granted(&self, lease: &Lease, message: LockMessage) -> AcquireResult {
        AcquireResult {
            success: true,
            job: self.job.clone(),
            holder: lease.holder.clone(),
            message,
            expires_at: lease.expires_at,
            grace_until: Some(lease.grace_until),
        }
    }

    fn rejected(&self, lease: &Lease, message: LockMessage) -> AcquireResult {
        let grace_until = (message == LockMessage::GracePeriodActive).then_some(lease.grace_until);
        AcquireResult {
            success: false,
            job: self.job.clone(),
            holder: lease.holder.clone(),
            message,
            expires_at: lease.expires_at,
            grace_until,
        }
    }
}

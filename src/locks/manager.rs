//! Multi-job lock manager.

use super::registry::{JobRegistry, RwLockRegistry};
use super::state::LockState;
use super::types::{AcquireResult, LockConfig, ReleaseResult, StatusResult};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::debug;

/// Owns one [`LockState`] per job name.
///
/// States are created on first reference with the manager's [`LockConfig`]
/// and are never evicted. The registry lock is released before the per-job
/// decision runs, so operations on different jobs never block each other.
#[derive(Debug)]
pub struct LockManager<R = RwLockRegistry> {
    registry: R,
    config: LockConfig,
}

impl LockManager {
    /// Manager with default timing (30s TTL, 5s grace).
    pub fn new() -> Self {
        Self::with_config(LockConfig::default())
    }

    pub fn with_config(config: LockConfig) -> Self {
        Self::with_registry(RwLockRegistry::new(), config)
    }
}

impl Default for LockManager {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: JobRegistry> LockManager<R> {
    /// Manager over a caller-supplied registry.
    pub fn with_registry(registry: R, config: LockConfig) -> Self {
        Self {
            registry,
            config: config.with_grace_period(config.grace_period),
        }
    }

    pub fn config(&self) -> LockConfig {
        self.config
    }

    /// TTL front ends should apply when a request does not carry one.
    pub fn default_ttl(&self) -> Duration {
        self.config.ttl
    }

    pub fn grace_period(&self) -> Duration {
        self.config.grace_period
    }

    /// Number of distinct jobs referenced so far.
    pub fn job_count(&self) -> usize {
        self.registry.len()
    }

    /// Acquire or renew `job` for `client`. `ttl` applies to this call only;
    /// the grace period always comes from the manager's configuration.
    pub fn acquire(&self, job: &str, client: &str, ttl: Duration) -> AcquireResult {
        self.state(job).acquire(client, ttl)
    }

    pub fn acquire_at(
        &self,
        job: &str,
        client: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> AcquireResult {
        self.state(job).acquire_at(client, ttl, now)
    }

    pub fn release(&self, job: &str, client: &str) -> ReleaseResult {
        self.state(job).release(client)
    }

    pub fn release_at(&self, job: &str, client: &str, now: DateTime<Utc>) -> ReleaseResult {
        self.state(job).release_at(client, now)
    }

    pub fn status(&self, job: &str) -> StatusResult {
        self.state(job).status()
    }

    pub fn status_at(&self, job: &str, now: DateTime<Utc>) -> StatusResult {
        self.state(job).status_at(now)
    }

    fn state(&self, job: &str) -> Arc<LockState> {
        let (state, inserted) = self
            .registry
            .get_or_insert_with(job, || LockState::with_config(job, self.config));
        if inserted {
            debug!(job, "tracking new job");
        }
        state
    }
}

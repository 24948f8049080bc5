//! Job-name to lock-state mapping.

use super::state::LockState;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Concurrent get-or-insert mapping from job name to its lock state.
///
/// Implementations only guard the mapping itself; each returned state
/// serializes its own operations, so callers must not hold any
/// registry-level lock while using it.
pub trait JobRegistry: Send + Sync {
    /// Return the state for `job`, inserting `make()` if absent, and whether
    /// this call inserted it.
    ///
    /// Concurrent callers for the same new job all receive the same state and
    /// exactly one of them sees `true`. `make` may run under the registry's
    /// lock, so it must not log or block.
    fn get_or_insert_with<F>(&self, job: &str, make: F) -> (Arc<LockState>, bool)
    where
        F: FnOnce() -> LockState;

    /// Number of jobs tracked.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `JobRegistry` backed by a reader/writer lock over a `HashMap`.
///
/// Lookups of known jobs share the read lock; only first references to a
/// job take the write lock.
#[derive(Debug, Default)]
pub struct RwLockRegistry {
    jobs: RwLock<HashMap<String, Arc<LockState>>>,
}

impl RwLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<LockState>>> {
        self.jobs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<LockState>>> {
        self.jobs.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl JobRegistry for RwLockRegistry {
    fn get_or_insert_with<F>(&self, job: &str, make: F) -> (Arc<LockState>, bool)
    where
        F: FnOnce() -> LockState,
    {
        if let Some(state) = self.read().get(job) {
            return (Arc::clone(state), false);
        }

        // Another writer may have inserted between the read and write locks;
        // `entry` re-checks under the write lock.
        match self.write().entry(job.to_string()) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), false),
            Entry::Vacant(entry) => (Arc::clone(entry.insert(Arc::new(make()))), true),
        }
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

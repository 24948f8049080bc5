//! Lease record held by the current owner of a lock.

use chrono::{DateTime, Duration, Utc};

/// Where a lease sits relative to its deadlines at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeasePhase {
    /// Before `expires_at`: the holder's claim is unconditionally valid.
    Fresh,
    /// Between `expires_at` and `grace_until`: only the holder may renew.
    Grace,
    /// At or past `grace_until`: the claim is extinguished.
    Lapsed,
}

/// The current holder's claim on a lock.
///
/// A lock with no lease is free. `grace_until` is always
/// `expires_at + grace_period`, so it never precedes `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lease {
    /// Identity of the client holding the lock.
    pub holder: String,

    /// When the holder first acquired the lock. Renewals keep it.
    pub acquired_at: DateTime<Utc>,

    /// When other clients may start contending for the lock.
    pub expires_at: DateTime<Utc>,

    /// When the holder's claim is fully extinguished.
    pub grace_until: DateTime<Utc>,
}

impl Lease {
    /// Start a new lease for `holder` at `now`.
    pub fn new(holder: &str, now: DateTime<Utc>, ttl: Duration, grace_period: Duration) -> Self {
        let expires_at = now + ttl;
        Self {
            holder: holder.to_string(),
            acquired_at: now,
            expires_at,
            grace_until: expires_at + grace_period,
        }
    }

    /// Push both deadlines forward from `now`, keeping `acquired_at`.
    pub fn renew(&mut self, now: DateTime<Utc>, ttl: Duration, grace_period: Duration) {
        self.expires_at = now + ttl;
        self.grace_until = self.expires_at + grace_period;
    }

    pub fn phase(&self, now: DateTime<Utc>) -> LeasePhase {
        if now < self.expires_at {
            LeasePhase::Fresh
        } else if now < self.grace_until {
            LeasePhase::Grace
        } else {
            LeasePhase::Lapsed
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn in_grace(&self, now: DateTime<Utc>) -> bool {
        self.phase(now) == LeasePhase::Grace
    }

    /// Time elapsed since the original acquisition.
    pub fn held_for(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.acquired_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn new_lease_sets_deadlines_from_now() {
        let lease = Lease::new("alice", t0(), Duration::seconds(30), Duration::seconds(5));

        assert_eq!(lease.holder, "alice");
        assert_eq!(lease.acquired_at, t0());
        assert_eq!(lease.expires_at, t0() + Duration::seconds(30));
        assert_eq!(lease.grace_until, t0() + Duration::seconds(35));
    }

    #[test]
    fn renew_keeps_acquired_at() {
        let mut lease = Lease::new("alice", t0(), Duration::seconds(30), Duration::seconds(5));
        let later = t0() + Duration::seconds(20);

        lease.renew(later, Duration::seconds(60), Duration::seconds(5));

        assert_eq!(lease.acquired_at, t0());
        assert_eq!(lease.expires_at, later + Duration::seconds(60));
        assert_eq!(lease.grace_until, later + Duration::seconds(65));
    }

    #[test]
    fn phase_boundaries() {
        let lease = Lease::new("alice", t0(), Duration::seconds(10), Duration::seconds(5));

        assert_eq!(lease.phase(t0()), LeasePhase::Fresh);
        assert_eq!(lease.phase(t0() + Duration::milliseconds(9_999)), LeasePhase::Fresh);
        assert_eq!(lease.phase(t0() + Duration::seconds(10)), LeasePhase::Grace);
        assert_eq!(lease.phase(t0() + Duration::milliseconds(14_999)), LeasePhase::Grace);
        assert_eq!(lease.phase(t0() + Duration::seconds(15)), LeasePhase::Lapsed);
    }

    #[test]
    fn expiry_and_grace_flags() {
        let lease = Lease::new("alice", t0(), Duration::seconds(10), Duration::seconds(5));

        assert!(!lease.is_expired(t0()));
        assert!(!lease.in_grace(t0()));

        let in_grace = t0() + Duration::seconds(12);
        assert!(lease.is_expired(in_grace));
        assert!(lease.in_grace(in_grace));

        let lapsed = t0() + Duration::seconds(20);
        assert!(lease.is_expired(lapsed));
        assert!(!lease.in_grace(lapsed));
    }

    #[test]
    fn held_for_measures_from_acquisition() {
        let lease = Lease::new("alice", t0(), Duration::seconds(10), Duration::seconds(5));
        assert_eq!(lease.held_for(t0() + Duration::seconds(7)), Duration::seconds(7));
    }

    #[test]
    fn zero_grace_skips_grace_phase() {
        let lease = Lease::new("alice", t0(), Duration::seconds(10), Duration::zero());
        assert_eq!(lease.phase(t0() + Duration::seconds(10)), LeasePhase::Lapsed);
    }
}

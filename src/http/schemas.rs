//! Request and response bodies for the lock API.

use super::error::ApiError;
use crate::duration::{format_duration, parse_duration};
use crate::locks::{AcquireResult, ReleaseResult, StatusResult};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Job name used when a request does not name one.
pub const DEFAULT_JOB: &str = "default";

/// Status message for a lock with a holder.
pub const LOCK_HELD: &str = "lock held";

/// Status message for a free lock.
pub const NO_LOCK_HELD: &str = "no lock held";

/// Query parameters accepted by `/lock`.
#[derive(Debug, Default, Deserialize)]
pub struct LockQuery {
    pub job: Option<String>,
    pub client: Option<String>,
    pub ttl: Option<String>,
}

impl LockQuery {
    /// Requested job, falling back to [`DEFAULT_JOB`].
    pub fn job(&self) -> &str {
        self.job
            .as_deref()
            .filter(|job| !job.is_empty())
            .unwrap_or(DEFAULT_JOB)
    }

    /// Requesting client. Required for acquire and release.
    pub fn client(&self) -> Result<&str, ApiError> {
        self.client
            .as_deref()
            .filter(|client| !client.is_empty())
            .ok_or(ApiError::MissingClient)
    }

    /// Requested TTL, or `default` when absent. Must be positive.
    pub fn ttl(&self, default: Duration) -> Result<Duration, ApiError> {
        let Some(raw) = self.ttl.as_deref().filter(|raw| !raw.is_empty()) else {
            return Ok(default);
        };
        match parse_duration(raw) {
            Some(ttl) if ttl > Duration::zero() => Ok(ttl),
            _ => Err(ApiError::InvalidTtl(raw.to_string())),
        }
    }
}

/// Body returned by every successful or conflicting lock call.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockResponse {
    pub success: bool,
    pub job: String,

    /// Empty when the lock is free.
    #[serde(default)]
    pub holder: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_expired: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_until: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held_for: Option<String>,
}

/// Body returned for rejected requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned by `/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub jobs: usize,
}

/// RFC 3339 with second precision and a `Z` suffix.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<AcquireResult> for LockResponse {
    fn from(result: AcquireResult) -> Self {
        Self {
            success: result.success,
            job: result.job,
            holder: result.holder,
            message: result.message.to_string(),
            expires_at: Some(format_timestamp(result.expires_at)),
            grace_until: result.grace_until.map(format_timestamp),
            ..Self::default()
        }
    }
}

impl From<ReleaseResult> for LockResponse {
    fn from(result: ReleaseResult) -> Self {
        Self {
            success: result.success,
            job: result.job,
            message: result.message.to_string(),
            held_for: result.held_for.map(format_duration),
            ..Self::default()
        }
    }
}

impl From<StatusResult> for LockResponse {
    fn from(status: StatusResult) -> Self {
        let message = if status.is_held() { LOCK_HELD } else { NO_LOCK_HELD };
        Self {
            success: true,
            job: status.job,
            holder: status.holder.unwrap_or_default(),
            message: message.to_string(),
            expires_at: status.expires_at.map(format_timestamp),
            is_expired: status.is_expired,
            grace_until: status
                .grace_until
                .filter(|_| status.in_grace)
                .map(format_timestamp),
            held_for: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locks::LockMessage;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn query_defaults() {
        let query = LockQuery::default();

        assert_eq!(query.job(), "default");
        assert!(matches!(query.client(), Err(ApiError::MissingClient)));
        assert_eq!(
            query.ttl(Duration::seconds(30)).unwrap(),
            Duration::seconds(30)
        );
    }

    #[test]
    fn query_empty_values_fall_back() {
        let query = LockQuery {
            job: Some(String::new()),
            client: Some(String::new()),
            ttl: Some(String::new()),
        };

        assert_eq!(query.job(), "default");
        assert!(query.client().is_err());
        assert_eq!(query.ttl(Duration::seconds(7)).unwrap(), Duration::seconds(7));
    }

    #[test]
    fn query_ttl_validation() {
        let query = |ttl: &str| LockQuery {
            ttl: Some(ttl.to_string()),
            ..LockQuery::default()
        };

        assert_eq!(
            query("1m").ttl(Duration::seconds(30)).unwrap(),
            Duration::minutes(1)
        );
        assert!(matches!(
            query("forever").ttl(Duration::seconds(30)),
            Err(ApiError::InvalidTtl(_))
        ));
        assert!(matches!(
            query("0s").ttl(Duration::seconds(30)),
            Err(ApiError::InvalidTtl(_))
        ));
    }

    #[test]
    fn timestamps_are_rfc3339_utc() {
        assert_eq!(format_timestamp(t0()), "2024-01-02T03:04:05Z");
    }

    #[test]
    fn acquire_result_maps_all_fields() {
        let response = LockResponse::from(AcquireResult {
            success: false,
            job: "backup".to_string(),
            holder: "alice".to_string(),
            message: LockMessage::GracePeriodActive,
            expires_at: t0(),
            grace_until: Some(t0() + Duration::seconds(5)),
        });

        assert!(!response.success);
        assert_eq!(response.job, "backup");
        assert_eq!(response.holder, "alice");
        assert_eq!(response.message, "grace period active");
        assert_eq!(response.expires_at.as_deref(), Some("2024-01-02T03:04:05Z"));
        assert_eq!(response.grace_until.as_deref(), Some("2024-01-02T03:04:10Z"));
    }

    #[test]
    fn release_result_reports_held_for() {
        let response = LockResponse::from(ReleaseResult {
            success: true,
            job: "backup".to_string(),
            message: LockMessage::Released,
            held_for: Some(Duration::seconds(75)),
        });

        assert_eq!(response.message, "lock released");
        assert_eq!(response.held_for.as_deref(), Some("1m15s"));
        assert_eq!(response.holder, "");
    }

    #[test]
    fn status_hides_grace_until_outside_grace() {
        let held = StatusResult {
            job: "backup".to_string(),
            holder: Some("alice".to_string()),
            expires_at: Some(t0()),
            grace_until: Some(t0() + Duration::seconds(5)),
            is_expired: false,
            in_grace: false,
        };

        let fresh = LockResponse::from(held.clone());
        assert_eq!(fresh.message, "lock held");
        assert_eq!(fresh.grace_until, None);

        let grace = LockResponse::from(StatusResult {
            is_expired: true,
            in_grace: true,
            ..held
        });
        assert!(grace.is_expired);
        assert_eq!(grace.grace_until.as_deref(), Some("2024-01-02T03:04:10Z"));
    }

    #[test]
    fn free_status_serializes_compactly() {
        let response = LockResponse::from(StatusResult {
            job: "default".to_string(),
            holder: None,
            expires_at: None,
            grace_until: None,
            is_expired: true,
            in_grace: false,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "job": "default",
                "holder": "",
                "message": "no lock held",
                "is_expired": true,
            })
        );
    }
}

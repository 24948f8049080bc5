use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, info, trace};

use super::AppState;
use super::error::ApiError;
use super::schemas::{ErrorResponse, HealthResponse, LockQuery, LockResponse, format_timestamp};
use crate::duration::format_duration;

/// `POST /lock` -- acquire or renew a job lock.
///
/// 200 when granted, 409 while another client's lease is fresh or in grace.
pub async fn acquire(
    State(state): State<AppState>,
    Query(query): Query<LockQuery>,
) -> Result<(StatusCode, Json<LockResponse>), ApiError> {
    let client = query.client()?;
    let ttl = query.ttl(state.manager.default_ttl())?;
    let job = query.job();

    let result = state.manager.acquire(job, client, ttl);

    let status = if result.success {
        info!(
            job,
            client,
            message = %result.message,
            expires_at = %format_timestamp(result.expires_at),
            ttl = %format_duration(ttl),
            "lock granted"
        );
        StatusCode::OK
    } else {
        // acquire only fails on contention
        debug_assert!(result.message.is_conflict());
        debug!(
            job,
            client,
            holder = %result.holder,
            message = %result.message,
            "lock contended"
        );
        StatusCode::CONFLICT
    };

    Ok((status, Json(LockResponse::from(result))))
}

/// `DELETE /lock` -- release a job lock held by the caller.
///
/// 200 on release, 403 when the caller is not the holder.
pub async fn release(
    State(state): State<AppState>,
    Query(query): Query<LockQuery>,
) -> Result<Response, ApiError> {
    let client = query.client()?;
    let job = query.job();

    let result = state.manager.release(job, client);

    if !result.success {
        debug!(job, client, message = %result.message, "release denied");
        let body = ErrorResponse {
            error: result.message.to_string(),
        };
        return Ok((StatusCode::FORBIDDEN, Json(body)).into_response());
    }

    info!(
        job,
        client,
        held_for = %result.held_for.map(format_duration).unwrap_or_default(),
        "lock released"
    );
    Ok((StatusCode::OK, Json(LockResponse::from(result))).into_response())
}

/// `GET /lock` -- report the current state of a job lock.
pub async fn status(
    State(state): State<AppState>,
    Query(query): Query<LockQuery>,
) -> Json<LockResponse> {
    let status = state.manager.status(query.job());
    trace!(
        job = %status.job,
        holder = ?status.holder,
        is_expired = status.is_expired,
        in_grace = status.in_grace,
        "lock status"
    );
    Json(LockResponse::from(status))
}

/// `GET /health` -- liveness plus the number of tracked jobs.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        jobs: state.manager.job_count(),
    })
}

use std::time::Duration as StdDuration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use joblock::http::{AppState, router};
use joblock::locks::{LockConfig, LockManager};

// -- Helpers --------------------------------------------------------------

fn build_app(config: LockConfig) -> Router {
    router(AppState::new(LockManager::with_config(config)))
}

fn default_app() -> Router {
    build_app(LockConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

// -- Tests ----------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let app = default_app();

    let (status, body) = send(&app, Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["jobs"], 0);
}

#[tokio::test]
async fn acquire_free_lock_returns_200() {
    let app = default_app();

    let (status, body) = send(&app, Method::POST, "/lock?job=backup&client=alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["job"], "backup");
    assert_eq!(body["holder"], "alice");
    assert_eq!(body["message"], "acquired");
    assert!(body["expires_at"].as_str().unwrap().ends_with('Z'));
    assert!(body["grace_until"].is_string());
}

#[tokio::test]
async fn acquire_without_job_uses_default_job() {
    let app = default_app();

    let (status, body) = send(&app, Method::POST, "/lock?client=alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"], "default");
}

#[tokio::test]
async fn acquire_requires_client() {
    let app = default_app();

    let (status, body) = send(&app, Method::POST, "/lock?job=backup").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "client parameter required");
}

#[tokio::test]
async fn acquire_rejects_invalid_ttl() {
    let app = default_app();

    for ttl in ["soon", "0s", "-5s"] {
        let uri = format!("/lock?client=alice&ttl={}", ttl);
        let (status, body) = send(&app, Method::POST, &uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "ttl={}", ttl);
        assert_eq!(body["error"], "invalid ttl format");
    }
}

#[tokio::test]
async fn renew_by_holder_returns_200() {
    let app = default_app();

    send(&app, Method::POST, "/lock?job=j&client=alice&ttl=10s").await;
    let (status, body) = send(&app, Method::POST, "/lock?job=j&client=alice&ttl=1m").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "renewed");
    assert_eq!(body["holder"], "alice");
}

#[tokio::test]
async fn acquire_held_lock_returns_409() {
    let app = default_app();

    send(&app, Method::POST, "/lock?job=j&client=alice").await;
    let (status, body) = send(&app, Method::POST, "/lock?job=j&client=bob").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["holder"], "alice");
    assert_eq!(body["message"], "held by another client");
    assert!(body["expires_at"].is_string());
    assert!(body.get("grace_until").is_none());
}

#[tokio::test]
async fn acquire_during_grace_returns_409() {
    let app = build_app(LockConfig::default().with_grace_period(Duration::seconds(60)));

    send(&app, Method::POST, "/lock?job=j&client=alice&ttl=1ms").await;
    tokio::time::sleep(StdDuration::from_millis(20)).await;

    let (status, body) = send(&app, Method::POST, "/lock?job=j&client=bob").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "grace period active");
    assert_eq!(body["holder"], "alice");
    assert!(body["grace_until"].is_string());

    // the holder itself may still renew
    let (status, body) = send(&app, Method::POST, "/lock?job=j&client=alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "renewed");
}

#[tokio::test]
async fn acquire_after_grace_steals_lock() {
    let app = build_app(LockConfig::default().with_grace_period(Duration::milliseconds(1)));

    send(&app, Method::POST, "/lock?job=j&client=alice&ttl=1ms").await;
    tokio::time::sleep(StdDuration::from_millis(20)).await;

    let (status, body) = send(&app, Method::POST, "/lock?job=j&client=bob").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["holder"], "bob");
    assert_eq!(body["message"], "acquired from alice");
}

#[tokio::test]
async fn release_by_holder_returns_200() {
    let app = default_app();

    send(&app, Method::POST, "/lock?job=j&client=alice").await;
    let (status, body) = send(&app, Method::DELETE, "/lock?job=j&client=alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "lock released");
    assert!(body["held_for"].is_string());

    // lock is free again
    let (status, body) = send(&app, Method::POST, "/lock?job=j&client=bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "acquired");
}

#[tokio::test]
async fn release_by_non_holder_returns_403() {
    let app = default_app();

    send(&app, Method::POST, "/lock?job=j&client=alice").await;
    let (status, body) = send(&app, Method::DELETE, "/lock?job=j&client=bob").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "client does not hold the lock");
}

#[tokio::test]
async fn release_of_free_lock_returns_403() {
    let app = default_app();

    let (status, body) = send(&app, Method::DELETE, "/lock?job=j&client=alice").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "client does not hold the lock");
}

#[tokio::test]
async fn release_requires_client() {
    let app = default_app();

    let (status, body) = send(&app, Method::DELETE, "/lock?job=j").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "client parameter required");
}

#[tokio::test]
async fn status_of_free_lock() {
    let app = default_app();

    let (status, body) = send(&app, Method::GET, "/lock?job=idle").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["job"], "idle");
    assert_eq!(body["holder"], "");
    assert_eq!(body["message"], "no lock held");
    assert_eq!(body["is_expired"], true);
    assert!(body.get("expires_at").is_none());
}

#[tokio::test]
async fn status_of_held_lock() {
    let app = default_app();

    send(&app, Method::POST, "/lock?job=j&client=alice").await;
    let (status, body) = send(&app, Method::GET, "/lock?job=j").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["holder"], "alice");
    assert_eq!(body["message"], "lock held");
    assert!(body["expires_at"].is_string());
    assert!(body.get("is_expired").is_none());
    assert!(body.get("grace_until").is_none());
}

#[tokio::test]
async fn status_in_grace_reports_grace_until() {
    let app = build_app(LockConfig::default().with_grace_period(Duration::seconds(60)));

    send(&app, Method::POST, "/lock?job=j&client=alice&ttl=1ms").await;
    tokio::time::sleep(StdDuration::from_millis(20)).await;
    let (_, body) = send(&app, Method::GET, "/lock?job=j").await;

    assert_eq!(body["is_expired"], true);
    assert!(body["grace_until"].is_string());
}

#[tokio::test]
async fn jobs_are_isolated() {
    let app = default_app();

    send(&app, Method::POST, "/lock?job=a&client=alice").await;
    let (status, _) = send(&app, Method::POST, "/lock?job=b&client=bob").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/lock?job=a").await;
    assert_eq!(body["holder"], "alice");

    let (_, body) = send(&app, Method::GET, "/health").await;
    assert_eq!(body["jobs"], 2);
}

#[tokio::test]
async fn unsupported_method_returns_405() {
    let app = default_app();

    let (status, _) = send(&app, Method::PUT, "/lock?client=alice").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

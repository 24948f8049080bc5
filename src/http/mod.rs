//! HTTP front end for the lock manager.
//!
//! One resource, `/lock`, with the operation chosen by method:
//! `POST` acquires or renews, `DELETE` releases, `GET` reports status.
//! Parameters travel in the query string (`job`, `client`, `ttl`).

pub mod error;
pub mod handlers;
pub mod schemas;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::locks::LockManager;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The lock manager shared by every request.
    pub manager: Arc<LockManager>,
}

impl AppState {
    pub fn new(manager: LockManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }
}

/// Build the router with the lock and health routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/lock",
            get(handlers::status)
                .post(handlers::acquire)
                .delete(handlers::release),
        )
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! HTTP routes

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post};

use crate::handlers::{auth, health, users};
use crate::middleware::log_request;
use crate::server::state::AppState;

/// Builds the full router with request logging applied.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route("/api/users/{username}", delete(users::delete_user))
        .route("/health", get(health::health_check))
        .fallback(health::not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

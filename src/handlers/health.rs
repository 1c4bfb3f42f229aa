//! Health endpoint and unknown-route fallback

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use chrono::{SecondsFormat, Utc};
use log::error;
use serde::Serialize;

use crate::auth::BackendStatus;
use crate::error::ApiError;
use crate::server::state::AppState;
use crate::storage::pool::ping;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    pub backend_status: BackendStatus,
    pub database: &'static str,
    pub timestamp: String,
}

/// GET /health
///
/// 503 only when the database does not answer. A disabled sheet backend is
/// reported but still healthy.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = match ping(state.store.pool()).await {
        Ok(()) => true,
        Err(e) => {
            error!("Health check database ping failed: {}", e);
            false
        }
    };

    let (status, code) = if database_ok {
        ("ok", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    let body = HealthResponse {
        status,
        backend: state.authenticator.backend_kind().as_str(),
        backend_status: state.authenticator.backend_status(),
        database: if database_ok { "up" } else { "down" },
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    (code, Json(body))
}

/// Fallback for routes that do not exist
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {} not found", uri.path()))
}

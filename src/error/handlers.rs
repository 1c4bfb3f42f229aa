//! Error handlers
//!
//! Translates `ApiError` into a status code and the uniform JSON error body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use log::{error, warn};
use serde::Serialize;

use crate::error::types::ApiError;

/// Wire shape of every error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    pub status_code: u16,
    pub timestamp: String,
}

/// Convert error to HTTP status code
pub fn error_to_status(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::Conflict(_) => StatusCode::CONFLICT,
        ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Name reported in the `error` field
fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::Validation(_) => "ValidationError",
        ApiError::Unauthorized(_) => "Unauthorized",
        ApiError::NotFound(_) => "NotFound",
        ApiError::Conflict(_) => "Conflict",
        ApiError::ServiceUnavailable(_) => "ServiceUnavailable",
        ApiError::Internal(_) => "InternalServerError",
    }
}

/// Client-facing message; never carries backend detail
fn public_message(err: &ApiError) -> String {
    match err {
        ApiError::Validation(_) => "Invalid request data".to_string(),
        ApiError::Unauthorized(msg) | ApiError::NotFound(msg) | ApiError::Conflict(msg) => {
            msg.clone()
        }
        ApiError::ServiceUnavailable(_) => {
            "Authentication service temporarily unavailable. Please try again later.".to_string()
        }
        ApiError::Internal(_) => "Internal server error".to_string(),
    }
}

/// Build the response body for an error
pub fn error_body(err: &ApiError) -> ApiErrorBody {
    let details = match err {
        ApiError::Validation(reasons) => Some(reasons.clone()),
        _ => None,
    };

    ApiErrorBody {
        error: error_kind(err).to_string(),
        message: public_message(err),
        details,
        status_code: error_to_status(err).as_u16(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Log an error at a level matching its severity
pub fn handle_error(err: &ApiError) {
    if error_to_status(err).is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        handle_error(&self);
        let status = error_to_status(&self);
        (status, Json(error_body(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_is_fixed() {
        assert_eq!(error_to_status(&ApiError::Validation(vec![])), StatusCode::BAD_REQUEST);
        assert_eq!(error_to_status(&ApiError::unauthorized("x")), StatusCode::UNAUTHORIZED);
        assert_eq!(error_to_status(&ApiError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(
            error_to_status(&ApiError::ServiceUnavailable("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            error_to_status(&ApiError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_hides_internal_detail() {
        let body = error_body(&ApiError::Internal("sqlite: disk I/O error at /var/db".into()));
        assert_eq!(body.error, "InternalServerError");
        assert_eq!(body.message, "Internal server error");
        assert_eq!(body.status_code, 500);
        assert!(body.details.is_none());

        let body = error_body(&ApiError::ServiceUnavailable("connect refused 10.0.0.3".into()));
        assert!(!body.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_validation_body_lists_reasons() {
        let body = error_body(&ApiError::Validation(vec!["a".into(), "b".into()]));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "ValidationError");
        assert_eq!(json["message"], "Invalid request data");
        assert_eq!(json["statusCode"], 400);
        assert_eq!(json["details"], serde_json::json!(["a", "b"]));
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}

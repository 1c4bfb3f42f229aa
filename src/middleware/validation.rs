//! Validation middleware
//!
//! Extractor that parses a JSON login body, applies the login rules, and
//! hands the handler trimmed credentials. Rejections are 400 with every reason.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use crate::auth::validator::{LoginRequest, validate_login};
use crate::error::ApiError;

/// A login body that passed validation
#[derive(Debug)]
pub struct ValidatedLogin(pub LoginRequest);

impl<S> FromRequest<S> for ValidatedLogin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|_| {
                ApiError::Validation(vec!["Request body must be a valid JSON object".to_string()])
            })?;

        validate_login(&body)
            .map(ValidatedLogin)
            .map_err(ApiError::Validation)
    }
}

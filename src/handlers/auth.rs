//! Auth endpoints
//!
//! `POST /api/auth/login` takes a JSON body; `GET /api/auth/verify` takes a
//! Basic authorization header. Both answer through the same authenticator.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use log::{info, warn};

use crate::auth::basic::parse_basic_auth;
use crate::auth::results::LoginResult;
use crate::error::ApiError;
use crate::middleware::ValidatedLogin;
use crate::server::state::AppState;

const INVALID_LOGIN: &str = "Invalid username or password";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedLogin(request): ValidatedLogin,
) -> Result<Json<LoginResult>, ApiError> {
    info!("Login attempt for user: {}", request.username);

    if !state
        .authenticator
        .authenticate(&request.username, &request.password)
        .await?
    {
        warn!("Failed login attempt for user: {}", request.username);
        return Err(ApiError::unauthorized(INVALID_LOGIN));
    }

    info!("Successful login for user: {}", request.username);
    Ok(Json(LoginResult::authenticated(
        "Login successful",
        request.username,
    )))
}

/// GET /api/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LoginResult>, ApiError> {
    // Non-visible-ASCII header values fall through as an invalid format
    let header = headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let (username, password) =
        parse_basic_auth(header).map_err(|e| ApiError::unauthorized(e.message()))?;

    if !state.authenticator.authenticate(&username, &password).await? {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    Ok(Json(LoginResult::authenticated(
        "Authentication successful",
        username,
    )))
}

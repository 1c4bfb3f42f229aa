//! User management endpoints
//!
//! Always operate on the local credential store, whichever backend
//! answers logins.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use log::info;

use crate::auth::results::{MutationResult, UserList, UserSummary};
use crate::error::ApiError;
use crate::middleware::ValidatedLogin;
use crate::server::state::AppState;

/// GET /api/users
///
/// Lists usernames only; stored hashes never leave the server.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserList>, ApiError> {
    let users = state
        .store
        .list()
        .await?
        .into_iter()
        .map(|record| UserSummary {
            username: record.username,
        })
        .collect();

    Ok(Json(UserList { users }))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedLogin(request): ValidatedLogin,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    state
        .store
        .create(&request.username, &request.password)
        .await?;

    info!("Created user: {}", request.username);
    Ok((StatusCode::CREATED, Json(MutationResult { success: true })))
}

/// DELETE /api/users/{username}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MutationResult>, ApiError> {
    state.store.delete(&username).await?;

    info!("Deleted user: {}", username);
    Ok(Json(MutationResult { success: true }))
}

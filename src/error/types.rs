//! Error types
//!
//! Defines domain-specific error types for each module of the auth server,
//! plus the closed set of API errors every request path funnels into.

use thiserror::Error;

/// Credential store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Spreadsheet source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Sheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheet service account token error: {0}")]
    Token(String),

    #[error("Sheet source unavailable: {0}")]
    Unavailable(String),
}

/// Authenticator errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Credential backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Stored credential is malformed for user: {0}")]
    CorruptCredential(String),
}

impl From<StoreError> for AuthError {
    fn from(error: StoreError) -> Self {
        AuthError::BackendUnavailable(error.to_string())
    }
}

impl From<SourceError> for AuthError {
    fn from(error: SourceError) -> Self {
        AuthError::BackendUnavailable(error.to_string())
    }
}

/// Every failure an HTTP handler can return.
///
/// The `message` strings are what the client sees; internal detail only
/// travels in `Internal` and `ServiceUnavailable` and is logged, never sent.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request data: {0:?}")]
    Validation(Vec<String>),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::BackendUnavailable(detail) => ApiError::ServiceUnavailable(detail),
            AuthError::CorruptCredential(_) => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateUser(username) => {
                ApiError::Conflict(format!("User '{username}' already exists"))
            }
            StoreError::InvalidUsername(_) => {
                ApiError::Validation(vec!["Username is required and must be a non-empty string".into()])
            }
            StoreError::Database(_) | StoreError::Hash(_) => ApiError::Internal(error.to_string()),
        }
    }
}

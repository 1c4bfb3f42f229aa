//! Authentication result types
//!
//! Response bodies returned by the auth and user endpoints. None of them
//! carry password material.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub username: String,
}

/// Body of a successful login or verify
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

impl LoginResult {
    pub fn authenticated(message: &str, username: String) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            user: Some(UserSummary { username }),
        }
    }
}

/// Body of a user mutation
#[derive(Debug, Clone, Serialize)]
pub struct MutationResult {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserList {
    pub users: Vec<UserSummary>,
}

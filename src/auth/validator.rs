//! Login request validation
//!
//! Checks the shape of a `{username, password}` body and returns the trimmed
//! credentials, or every reason the body was rejected.

use serde_json::Value;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Credentials that passed validation, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Validates a parsed JSON body.
///
/// Reasons come back in a fixed order: required username, required password,
/// username length, password length. Lengths count characters after trimming.
pub fn validate_login(body: &Value) -> Result<LoginRequest, Vec<String>> {
    let username = body.get("username").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);

    let mut errors = Vec::new();

    if !is_non_blank(username) {
        errors.push("Username is required and must be a non-empty string".to_string());
    }

    if !is_non_blank(password) {
        errors.push("Password is required and must be a non-empty string".to_string());
    }

    if let Some(u) = username.filter(|u| !u.is_empty()) {
        if u.trim().chars().count() < MIN_USERNAME_LENGTH {
            errors.push(format!(
                "Username must be at least {MIN_USERNAME_LENGTH} characters long"
            ));
        }
    }

    if let Some(p) = password.filter(|p| !p.is_empty()) {
        if p.trim().chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            ));
        }
    }

    match (username, password) {
        (Some(u), Some(p)) if errors.is_empty() => Ok(LoginRequest {
            username: u.trim().to_string(),
            password: p.trim().to_string(),
        }),
        _ => Err(errors),
    }
}

fn is_non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

//! HTTP request handlers
//!
//! Translate requests into authenticator and store calls and shape the
//! responses. Every failure leaves as an `ApiError`.

pub mod auth;
pub mod health;
pub mod users;

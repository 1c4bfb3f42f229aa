//! Error handling
//!
//! Defines the domain error types and their translation into HTTP responses.

pub mod handlers;
pub mod types;

pub use types::*;

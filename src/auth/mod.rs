//! Authentication system
//!
//! Password hashing, credential backends, the authenticator, and the
//! request-level checks (login body rules, Basic header parsing).

pub mod authenticator;
pub mod backend;
pub mod basic;
pub mod password;
pub mod results;
pub mod validator;

pub use authenticator::Authenticator;
pub use backend::{BackendStatus, CredentialBackend};
pub use password::CredentialHasher;
pub use validator::{LoginRequest, validate_login};

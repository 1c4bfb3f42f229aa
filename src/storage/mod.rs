//! Credential storage
//!
//! SQLite connection pool and the credential record store.

pub mod credentials;
pub mod pool;

pub use credentials::{CredentialRecord, CredentialStore};
pub use pool::create_pool;

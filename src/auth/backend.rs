//! Credential backends
//!
//! The single capability the authenticator needs from a credential source:
//! find the entries a username resolves to, then check a password against
//! them. A login succeeds if any entry accepts the password. Each backend
//! owns its comparison policy.
//!
//! | backend  | username match   | password check               |
//! |----------|------------------|------------------------------|
//! | database | exact            | Argon2 verify against hash   |
//! | sheets   | case-insensitive | constant-time plaintext eq   |

use async_trait::async_trait;
use serde::Serialize;

use crate::config::AuthBackend;
use crate::error::AuthError;
use crate::sheets::SheetSource;
use crate::sheets::source::passwords_match;
use crate::storage::CredentialStore;

/// Whether a backend can answer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    Active,
    /// Not configured; every lookup comes back empty
    Disabled,
}

/// A user as found by a backend. `secret` is a hash or a plaintext password
/// depending on the backend, and only that backend interprets it.
#[derive(Debug, Clone)]
pub struct ResolvedUser {
    pub username: String,
    pub(crate) secret: String,
}

#[async_trait]
pub trait CredentialBackend: Send + Sync {
    fn kind(&self) -> AuthBackend;

    fn status(&self) -> BackendStatus;

    /// Every stored entry the username resolves to. The store yields at most
    /// one; a sheet may list the same name in several rows.
    async fn find_candidates(&self, username: &str) -> Result<Vec<ResolvedUser>, AuthError>;

    fn verify_password(&self, user: &ResolvedUser, password: &str) -> Result<bool, AuthError>;

    /// Spends the cost of a failed verification when no user was found.
    fn verify_missing(&self, _password: &str) {}
}

#[async_trait]
impl CredentialBackend for CredentialStore {
    fn kind(&self) -> AuthBackend {
        AuthBackend::Database
    }

    fn status(&self) -> BackendStatus {
        BackendStatus::Active
    }

    async fn find_candidates(&self, username: &str) -> Result<Vec<ResolvedUser>, AuthError> {
        Ok(self
            .find_by_username(username)
            .await?
            .map(|record| ResolvedUser {
                username: record.username,
                secret: record.password_hash,
            })
            .into_iter()
            .collect())
    }

    fn verify_password(&self, user: &ResolvedUser, password: &str) -> Result<bool, AuthError> {
        self.hasher()
            .verify(password, &user.secret)
            .map_err(|_| AuthError::CorruptCredential(user.username.clone()))
    }

    fn verify_missing(&self, password: &str) {
        self.hasher().verify_decoy(password);
    }
}

#[async_trait]
impl CredentialBackend for SheetSource {
    fn kind(&self) -> AuthBackend {
        AuthBackend::Sheets
    }

    fn status(&self) -> BackendStatus {
        if self.is_enabled() {
            BackendStatus::Active
        } else {
            BackendStatus::Disabled
        }
    }

    async fn find_candidates(&self, username: &str) -> Result<Vec<ResolvedUser>, AuthError> {
        Ok(self
            .find_users(username)
            .await?
            .into_iter()
            .map(|user| ResolvedUser {
                username: user.username,
                secret: user.password,
            })
            .collect())
    }

    fn verify_password(&self, user: &ResolvedUser, password: &str) -> Result<bool, AuthError> {
        Ok(passwords_match(&user.secret, password))
    }
}


//! Authenticator
//!
//! Resolves a user through the active backend and checks the password.
//! Holds no per-request state.

use log::{info, warn};
use std::sync::Arc;
use tokio::task;

use crate::auth::backend::{BackendStatus, CredentialBackend};
use crate::config::AuthBackend;
use crate::error::AuthError;

#[derive(Clone)]
pub struct Authenticator {
    backend: Arc<dyn CredentialBackend>,
}

impl Authenticator {
    pub fn new(backend: Arc<dyn CredentialBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_kind(&self) -> AuthBackend {
        self.backend.kind()
    }

    pub fn backend_status(&self) -> BackendStatus {
        self.backend.status()
    }

    /// Returns `Ok(true)` only for a known user with a matching password.
    ///
    /// Unknown users are `Ok(false)`, indistinguishable from a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.backend.status() == BackendStatus::Disabled {
            warn!(
                "Rejecting login for '{}': {} backend is disabled",
                username,
                self.backend.kind().as_str()
            );
            return Ok(false);
        }

        let candidates = self.backend.find_candidates(username).await?;

        // Argon2 verification is CPU-bound; keep it off the async workers
        let backend = Arc::clone(&self.backend);
        let password = password.to_string();
        let authenticated = task::spawn_blocking(move || -> Result<bool, AuthError> {
            if candidates.is_empty() {
                backend.verify_missing(&password);
                return Ok(false);
            }

            let mut matched = false;
            for user in &candidates {
                matched |= backend.verify_password(user, &password)?;
            }
            Ok(matched)
        })
        .await
        .map_err(|e| AuthError::BackendUnavailable(format!("verification task failed: {e}")))??;

        info!(
            "Authentication attempt for user '{}': {}",
            username,
            if authenticated { "SUCCESS" } else { "FAILED" }
        );
        Ok(authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::SheetSource;
    use crate::sheets::source::testing::StaticSheet;
    use crate::storage::credentials::test_store;

    #[tokio::test]
    async fn test_store_round_trip() {
        let store = test_store().await;
        store.create("alice", "secret1").await.unwrap();
        let auth = Authenticator::new(Arc::new(store));

        assert!(auth.authenticate("alice", "secret1").await.unwrap());
        assert!(!auth.authenticate("alice", "secret1x").await.unwrap());
        assert_eq!(auth.backend_kind(), AuthBackend::Database);
    }

    #[tokio::test]
    async fn test_store_single_character_mutations_fail() {
        let store = test_store().await;
        store.create("alice", "secret1").await.unwrap();
        let auth = Authenticator::new(Arc::new(store));

        for wrong in ["secret2", "Secret1", "secre1", "xsecret1", "secret1 "] {
            assert!(!auth.authenticate("alice", wrong).await.unwrap(), "{wrong}");
        }
    }

    #[tokio::test]
    async fn test_unknown_user_is_false_not_error() {
        let auth = Authenticator::new(Arc::new(test_store().await));
        assert!(!auth.authenticate("ghost", "secret1").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_reported() {
        let store = test_store().await;
        sqlx::query("INSERT INTO users (username, password_hash) VALUES ('mallory', 'plain')")
            .execute(store.pool())
            .await
            .unwrap();
        let auth = Authenticator::new(Arc::new(store));

        assert!(matches!(
            auth.authenticate("mallory", "plain").await,
            Err(AuthError::CorruptCredential(_))
        ));
    }

    #[tokio::test]
    async fn test_sheet_backend() {
        let source = StaticSheet::source(&[&["user", "pass"], &["Alice", "wonderland"]]);
        let auth = Authenticator::new(Arc::new(source));

        assert!(auth.authenticate("alice", "wonderland").await.unwrap());
        assert!(!auth.authenticate("alice", "WONDERLAND").await.unwrap());
        assert!(!auth.authenticate("bob", "wonderland").await.unwrap());
        assert_eq!(auth.backend_kind(), AuthBackend::Sheets);
    }

    #[tokio::test]
    async fn test_sheet_rows_differing_in_case_both_count() {
        let source = StaticSheet::source(&[
            &["username", "password"],
            &["Alice", "oldpass1"],
            &["alice", "newpass1"],
        ]);
        let auth = Authenticator::new(Arc::new(source));

        assert!(auth.authenticate("alice", "newpass1").await.unwrap());
        assert!(auth.authenticate("alice", "oldpass1").await.unwrap());
        assert!(!auth.authenticate("alice", "nopass11").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_store_logins() {
        let store = test_store().await;
        store.create("alice", "secret1").await.unwrap();
        store.create("bob", "secret2").await.unwrap();
        let auth = Authenticator::new(Arc::new(store));

        let (a, b, c) = tokio::join!(
            auth.authenticate("alice", "secret1"),
            auth.authenticate("bob", "secret2"),
            auth.authenticate("ghost", "secret3"),
        );
        assert!(a.unwrap());
        assert!(b.unwrap());
        assert!(!c.unwrap());
    }

    #[tokio::test]
    async fn test_sheet_failure_is_backend_unavailable() {
        let auth = Authenticator::new(Arc::new(StaticSheet::failing()));
        assert!(matches!(
            auth.authenticate("alice", "wonderland").await,
            Err(AuthError::BackendUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_disabled_sheet_rejects() {
        let auth = Authenticator::new(Arc::new(SheetSource::Disabled));
        assert_eq!(auth.backend_status(), BackendStatus::Disabled);
        assert!(!auth.authenticate("alice", "wonderland").await.unwrap());
    }
}

//! Credential store
//!
//! Persists username → Argon2 hash records in the `users` table.
//! Usernames match exactly (SQLite BINARY collation, so case-sensitive).

use log::info;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::auth::password::CredentialHasher;
use crate::error::StoreError;

/// A persisted credential record. Never holds plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CredentialRecord {
    pub username: String,
    pub password_hash: String,
}

/// SQLite-backed credential store. Cloning shares the pool.
#[derive(Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
    hasher: CredentialHasher,
}

impl CredentialStore {
    pub fn new(pool: SqlitePool, hasher: CredentialHasher) -> Self {
        Self { pool, hasher }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    /// Creates the `users` table when it does not exist yet.
    pub async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                username TEXT PRIMARY KEY NOT NULL,
                password_hash TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Credential store initialized");
        Ok(())
    }

    /// Returns every record, in no particular order.
    pub async fn list(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        let records = sqlx::query_as::<_, CredentialRecord>(
            "SELECT username, password_hash FROM users",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let record = sqlx::query_as::<_, CredentialRecord>(
            "SELECT username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Hashes `password` and inserts a new record in one statement.
    pub async fn create(&self, username: &str, password: &str) -> Result<(), StoreError> {
        if username.trim().is_empty() {
            return Err(StoreError::InvalidUsername(username.to_string()));
        }

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| StoreError::Hash(format!("Hashing task failed: {e}")))??;

        sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(&password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    StoreError::DuplicateUser(username.to_string())
                }
                _ => StoreError::Database(e),
            })?;

        Ok(())
    }

    /// Removes a record. Deleting an unknown user is not an error.
    pub async fn delete(&self, username: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) async fn test_store() -> CredentialStore {
    let pool = crate::storage::pool::create_pool("sqlite::memory:", 1)
        .await
        .unwrap();
    let store = CredentialStore::new(pool, crate::auth::password::test_hasher());
    store.init().await.unwrap();
    store
}

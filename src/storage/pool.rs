//! Database pool
//!
//! Builds the shared SQLite connection pool used by the credential store.

use log::debug;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::error::StoreError;

/// Create a SqlitePool with WAL mode, creating the database file if missing.
///
/// In-memory URLs skip WAL; a `:memory:` database only lives as long as its
/// single connection, so callers should pass `max_connections = 1` for those.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, StoreError> {
    let mut options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    if !database_url.contains(":memory:") {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    debug!("Database pool created ({} max connections)", max_connections);
    Ok(pool)
}

/// Cheap round trip used by the health endpoint
pub async fn ping(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

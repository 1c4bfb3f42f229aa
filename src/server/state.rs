//! Application state
//!
//! Process-scoped resources built once at startup and handed to every handler.

use log::info;
use std::sync::Arc;

use crate::auth::{Authenticator, CredentialBackend, CredentialHasher};
use crate::config::{AuthBackend, ServerConfig};
use crate::error::{SourceError, StoreError};
use crate::sheets::{self, SheetSource};
use crate::storage::{CredentialStore, create_pool};

#[derive(Clone)]
pub struct AppState {
    pub store: CredentialStore,
    pub authenticator: Authenticator,
}

/// Startup failures
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Credential store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("Sheet source setup failed: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to bind {0}: {1}")]
    Bind(String, std::io::Error),

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl AppState {
    /// Wires the store and the configured authentication backend together.
    pub fn new(store: CredentialStore, backend: AuthBackend, sheet: SheetSource) -> Self {
        let backend: Arc<dyn CredentialBackend> = match backend {
            AuthBackend::Database => Arc::new(store.clone()),
            AuthBackend::Sheets => Arc::new(sheet),
        };

        Self {
            store,
            authenticator: Authenticator::new(backend),
        }
    }

    /// Opens the pool, prepares the schema, and builds the sheet source.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, StartupError> {
        let pool = create_pool(&config.database_url, config.max_connections).await?;
        let hasher = CredentialHasher::new(&config.hashing)?;
        let store = CredentialStore::new(pool, hasher);
        store.init().await?;

        let sheet = match config.auth_backend {
            AuthBackend::Sheets => sheets::source_from_config(&config.sheets)?,
            AuthBackend::Database => SheetSource::Disabled,
        };

        info!(
            "Authenticating against the {} backend",
            config.auth_backend.as_str()
        );
        Ok(Self::new(store, config.auth_backend, sheet))
    }
}

//! Spreadsheet credential source
//!
//! Google Sheets client and the read-only user source built on it.

pub mod client;
pub mod source;

pub use client::{GoogleSheetsClient, SheetClient};
pub use source::{SheetSource, SheetUser};

use log::{info, warn};
use std::sync::Arc;

use crate::config::SheetsConfig;
use crate::error::SourceError;

/// Builds the sheet source from configuration.
///
/// Missing identifiers give `SheetSource::Disabled`; a present but unusable
/// private key is a startup error.
pub fn source_from_config(config: &SheetsConfig) -> Result<SheetSource, SourceError> {
    match config.credentials() {
        Some(credentials) => {
            let client = GoogleSheetsClient::new(credentials, config)?;
            info!("Sheet source initialized for range {}", config.range);
            Ok(SheetSource::Enabled(Arc::new(client)))
        }
        None => {
            warn!("Sheet source identifiers not configured. Sheet authentication is disabled.");
            Ok(SheetSource::Disabled)
        }
    }
}

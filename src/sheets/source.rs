//! Spreadsheet credential source
//!
//! Exposes the username/password pairs of a sheet as a read-only set,
//! re-fetched on every call. Usernames match case-insensitively; passwords
//! are compared as plaintext because the sheet is the system of record.

use log::{info, warn};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::SourceError;
use crate::sheets::client::SheetClient;

/// A row of the sheet after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetUser {
    pub username: String,
    pub password: String,
}

/// Sheet source: either wired to a client or deliberately switched off.
#[derive(Clone)]
pub enum SheetSource {
    /// No spreadsheet configured; every listing is empty
    Disabled,
    Enabled(Arc<dyn SheetClient>),
}

impl SheetSource {
    pub fn is_enabled(&self) -> bool {
        matches!(self, SheetSource::Enabled(_))
    }

    /// Fetches and parses all users from the sheet.
    pub async fn list_users(&self) -> Result<Vec<SheetUser>, SourceError> {
        let client = match self {
            SheetSource::Disabled => {
                warn!("Sheet source not configured; returning no users");
                return Ok(Vec::new());
            }
            SheetSource::Enabled(client) => client,
        };

        let rows = client
            .fetch_rows()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        let users = rows_to_users(rows);
        info!("Retrieved {} users from sheet", users.len());
        Ok(users)
    }

    /// All rows whose username matches, in sheet order.
    pub async fn find_users(&self, username: &str) -> Result<Vec<SheetUser>, SourceError> {
        let users = self.list_users().await?;
        Ok(users
            .into_iter()
            .filter(|u| usernames_match(&u.username, username))
            .collect())
    }

    /// True when some row matches the username (any case) and the exact password.
    pub async fn authenticate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, SourceError> {
        let users = self.list_users().await?;
        let authenticated = users.iter().any(|u| {
            usernames_match(&u.username, username) && passwords_match(&u.password, password)
        });

        info!(
            "Sheet authentication for '{}': {}",
            username,
            if authenticated { "SUCCESS" } else { "FAILED" }
        );
        Ok(authenticated)
    }
}

pub(crate) fn usernames_match(stored: &str, candidate: &str) -> bool {
    stored.to_lowercase() == candidate.to_lowercase()
}

pub(crate) fn passwords_match(stored: &str, candidate: &str) -> bool {
    stored.as_bytes().ct_eq(candidate.as_bytes()).into()
}

/// Skips the header row, trims cells, drops rows missing either column.
pub fn rows_to_users(rows: Vec<Vec<String>>) -> Vec<SheetUser> {
    rows.into_iter()
        .skip(1)
        .filter_map(|row| {
            let mut cells = row.into_iter();
            let username = cells.next().unwrap_or_default().trim().to_string();
            let password = cells.next().unwrap_or_default().trim().to_string();

            if username.is_empty() || password.is_empty() {
                None
            } else {
                Some(SheetUser { username, password })
            }
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::testing::StaticSheet;
    use super::*;

    fn sheet() -> SheetSource {
        StaticSheet::source(&[
            &["username", "password"],
            &["  Alice ", " wonderland "],
            &["bob", ""],
            &["", "orphan-pass"],
            &["carol"],
            &["dave", "hunter22", "extra column"],
        ])
    }

    #[test]
    fn test_rows_skip_header_and_blanks() {
        let rows = vec![
            vec!["username".to_string(), "password".to_string()],
            vec![" alice ".to_string(), " secret1 ".to_string()],
            vec!["   ".to_string(), "x".to_string()],
        ];

        assert_eq!(
            rows_to_users(rows),
            vec![SheetUser {
                username: "alice".into(),
                password: "secret1".into()
            }]
        );
        assert!(rows_to_users(vec![]).is_empty());
    }

    #[tokio::test]
    async fn test_list_users_filters_rows() {
        let users = sheet().list_users().await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["Alice", "dave"]);
    }

    #[tokio::test]
    async fn test_disabled_source_is_empty_not_error() {
        let source = SheetSource::Disabled;
        assert!(!source.is_enabled());
        assert!(source.list_users().await.unwrap().is_empty());
        assert!(!source.authenticate_user("alice", "wonderland").await.unwrap());
    }

    #[tokio::test]
    async fn test_username_case_insensitive_password_exact() {
        let source = sheet();
        assert!(source.authenticate_user("alice", "wonderland").await.unwrap());
        assert!(source.authenticate_user("ALICE", "wonderland").await.unwrap());
        assert!(!source.authenticate_user("alice", "Wonderland").await.unwrap());
        assert!(!source.authenticate_user("alice", "wonderlan").await.unwrap());
        assert!(!source.authenticate_user("bob", "").await.unwrap());
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces() {
        let source = StaticSheet::failing();
        assert!(matches!(
            source.list_users().await,
            Err(SourceError::Unavailable(_))
        ));
        assert!(source.authenticate_user("alice", "wonderland").await.is_err());
    }

    #[tokio::test]
    async fn test_find_users() {
        let found = sheet().find_users("DAVE").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].password, "hunter22");
        assert!(sheet().find_users("erin").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_any_row_with_matching_pair_authenticates() {
        let source = StaticSheet::source(&[
            &["username", "password"],
            &["Alice", "oldpass1"],
            &["alice", "newpass1"],
        ]);

        assert!(source.authenticate_user("alice", "newpass1").await.unwrap());
        assert!(source.authenticate_user("ALICE", "oldpass1").await.unwrap());
        assert!(!source.authenticate_user("alice", "otherpass").await.unwrap());
        assert_eq!(source.find_users("alice").await.unwrap().len(), 2);
    }
}

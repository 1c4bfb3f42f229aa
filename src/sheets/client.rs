//! Google Sheets client
//!
//! Fetches the raw rows of a configured cell range using a service account.
//! The OAuth access token is kept until shortly before it expires; row data
//! is always fetched fresh.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

use crate::config::{SheetsConfig, SheetsCredentials};
use crate::error::SourceError;

const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Anything that can hand back the rows of a spreadsheet range.
#[async_trait]
pub trait SheetClient: Send + Sync {
    /// Returns every row of the range, cells rendered as strings.
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, SourceError>;
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Sheets v4 `values.get` client authenticated as a service account.
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    credentials: SheetsCredentials,
    encoding_key: EncodingKey,
    range: String,
    token_uri: String,
    api_base: String,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetsClient {
    /// Builds a client; fails if the private key is not a valid RSA PEM.
    pub fn new(
        credentials: SheetsCredentials,
        config: &SheetsConfig,
    ) -> Result<Self, SourceError> {
        let encoding_key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .map_err(|e| SourceError::Token(format!("Invalid service account key: {e}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            credentials,
            encoding_key,
            range: config.range.clone(),
            token_uri: config.token_uri.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    fn signed_assertion(&self) -> Result<String, SourceError> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| SourceError::Token(format!("System time error: {e}")))?
            .as_secs();

        let claims = Claims {
            iss: &self.credentials.client_email,
            scope: SHEETS_READONLY_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| SourceError::Token(format!("Failed to sign assertion: {e}")))
    }

    async fn access_token(&self) -> Result<String, SourceError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let assertion = self.signed_assertion()?;
        let response: TokenResponse = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let lifetime = Duration::from_secs(response.expires_in);
        debug!("Obtained sheets access token valid for {}s", lifetime.as_secs());

        *cached = Some(CachedToken {
            value: response.access_token.clone(),
            refresh_at: Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN),
        });

        Ok(response.access_token)
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base,
            urlencoding::encode(&self.credentials.spreadsheet_id),
            urlencoding::encode(&self.range)
        )
    }
}

#[async_trait]
impl SheetClient for GoogleSheetsClient {
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, SourceError> {
        let token = self.access_token().await?;

        let range: ValueRange = self
            .http
            .get(self.values_url())
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }
}

fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

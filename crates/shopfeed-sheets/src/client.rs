//! HTTP client for the Sheets v4 API.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::AccessToken;
use crate::error::SheetsError;
use crate::types::{render_cell, Spreadsheet, ValueRange};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/";

pub(crate) const USER_AGENT: &str = "shopfeed/0.1 (catalog-sync)";

/// Authenticated, read-only Sheets API client.
pub struct SheetsClient {
    client: reqwest::Client,
    token: AccessToken,
    base_url: Url,
}

impl SheetsClient {
    /// Creates a client against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(token: AccessToken, timeout_secs: u64) -> Result<Self, SheetsError> {
        Self::with_base_url(token, DEFAULT_BASE_URL, timeout_secs)
    }

    /// Creates a client against an alternate endpoint. Exists for tests.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::InvalidBaseUrl`] when `base_url` does not
    /// parse, or [`SheetsError::Http`] when the HTTP client cannot be
    /// constructed.
    pub fn with_base_url(
        token: AccessToken,
        base_url: &str,
        timeout_secs: u64,
    ) -> Result<Self, SheetsError> {
        // Normalise: ensure the base URL ends with exactly one slash.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|source| SheetsError::InvalidBaseUrl {
            url: normalized.clone(),
            reason: source.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            token,
            base_url,
        })
    }

    /// Fetches the cells in `range` as rows of text.
    ///
    /// Rows keep the API's ragged shape: trailing empty cells are absent
    /// rather than blank, and an empty range yields no rows at all.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Api`] when the API rejects the request,
    /// [`SheetsError::Http`] on transport failures, and
    /// [`SheetsError::Deserialize`] when the response body does not match
    /// the documented envelope.
    pub async fn fetch_rows(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.endpoint(&["v4", "spreadsheets", spreadsheet_id, "values", range]);
        let envelope: ValueRange = self.request_json(url, "value range").await?;
        Ok(envelope
            .values
            .iter()
            .map(|row| row.iter().map(render_cell).collect())
            .collect())
    }

    /// Fetches the spreadsheet's title.
    ///
    /// Used as a cheap access probe: a title fetch exercises credentials
    /// and sharing without pulling cell data.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SheetsClient::fetch_rows`].
    pub async fn fetch_spreadsheet_title(
        &self,
        spreadsheet_id: &str,
    ) -> Result<String, SheetsError> {
        let url = self.endpoint(&["v4", "spreadsheets", spreadsheet_id]);
        let spreadsheet: Spreadsheet = self.request_json(url, "spreadsheet metadata").await?;
        Ok(spreadsheet.properties.title)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, SheetsError> {
        tracing::debug!(%url, "requesting");
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token.secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: extract_api_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| SheetsError::Deserialize {
            context: context.to_string(),
            source,
        })
    }
}

/// Pulls the human-readable message out of a Google error body.
///
/// Sheets API errors nest as `{"error": {"message": ...}}`; the token
/// endpoint uses flat `{"error": ..., "error_description": ...}` pairs.
/// Falls back to the raw body when neither shape matches.
pub(crate) fn extract_api_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
        if let Some(description) = value.get("error_description").and_then(Value::as_str) {
            return description.to_string();
        }
        if let Some(code) = value.get("error").and_then(Value::as_str) {
            return code.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "unknown error".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

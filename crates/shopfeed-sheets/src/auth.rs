//! OAuth2 service-account flow.
//!
//! The Sheets API accepts a short-lived access token obtained by signing
//! a JWT assertion with the service account's RSA key and exchanging it
//! at the token endpoint.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::client::{extract_api_message, USER_AGENT};
use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;
use crate::types::TokenResponse;

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Bearer token for Sheets API requests.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a bearer token obtained out of band.
    #[must_use]
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    pub(crate) fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[redacted]").finish()
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Obtains an access token for the read-only Sheets scope.
///
/// # Errors
///
/// - [`SheetsError::InvalidPrivateKey`] when the key file's PEM block
///   cannot be parsed.
/// - [`SheetsError::AssertionSign`] when signing fails.
/// - [`SheetsError::TokenExchange`] when the token endpoint rejects the
///   assertion.
/// - [`SheetsError::Http`] on transport failures.
pub async fn authenticate(
    key: &ServiceAccountKey,
    timeout_secs: u64,
) -> Result<AccessToken, SheetsError> {
    let assertion = sign_assertion(key, Utc::now().timestamp())?;
    exchange_assertion(&key.token_uri, &assertion, timeout_secs).await
}

fn sign_assertion(key: &ServiceAccountKey, issued_at: i64) -> Result<String, SheetsError> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|source| SheetsError::InvalidPrivateKey { source })?;
    let claims = assertion_claims(key, issued_at);
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .map_err(|source| SheetsError::AssertionSign { source })
}

fn assertion_claims(key: &ServiceAccountKey, issued_at: i64) -> AssertionClaims {
    AssertionClaims {
        iss: key.client_email.clone(),
        scope: SHEETS_SCOPE.to_string(),
        aud: key.token_uri.clone(),
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    }
}

async fn exchange_assertion(
    token_url: &str,
    assertion: &str,
    timeout_secs: u64,
) -> Result<AccessToken, SheetsError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()?;

    let response = client
        .post(token_url)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SheetsError::TokenExchange {
            status: status.as_u16(),
            detail: extract_api_message(&body),
        });
    }

    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|source| SheetsError::Deserialize {
            context: "token exchange response".to_string(),
            source,
        })?;
    tracing::debug!(expires_in = token.expires_in, "obtained access token");
    Ok(AccessToken::new(token.access_token))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

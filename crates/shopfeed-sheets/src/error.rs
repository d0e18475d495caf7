use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read credentials file {path}: {source}")]
    CredentialsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("credentials file {path} is not a valid service-account key: {source}")]
    CredentialsParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("credentials file has a blank '{field}'")]
    CredentialsField { field: &'static str },

    #[error("service-account private key rejected: {source}")]
    InvalidPrivateKey {
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    #[error("failed to sign token assertion: {source}")]
    AssertionSign {
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    #[error("token exchange failed with HTTP {status}: {detail}")]
    TokenExchange { status: u16, detail: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Sheets API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

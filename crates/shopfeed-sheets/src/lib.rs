//! Google Sheets v4 access for the catalog pipeline.
//!
//! Flow: load a service-account key ([`load_credentials`]), exchange it for
//! a bearer token ([`authenticate`]), then read rows and metadata through
//! [`SheetsClient`].

mod auth;
mod client;
mod credentials;
mod error;
mod types;

pub use auth::{authenticate, AccessToken};
pub use client::SheetsClient;
pub use credentials::{load_credentials, ServiceAccountKey};
pub use error::SheetsError;

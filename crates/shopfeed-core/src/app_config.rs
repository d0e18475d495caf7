use std::path::PathBuf;

/// Settings read from the environment (or `.env`) at startup.
///
/// Every field has a default; a bare checkout with a `credentials.json`
/// beside it runs without any environment setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// A1-style range fetched from the sheet, e.g. `Sheet1` or `Sheet1!A1:P500`.
    pub sheet_range: String,
    /// Path to the service-account key file.
    pub credentials_path: PathBuf,
    /// Path of the catalog document this tool maintains.
    pub output_path: PathBuf,
    /// Directory that receives timestamped copies of the previous catalog.
    pub backup_dir: PathBuf,
    /// Directory for the rolling log file.
    pub log_dir: PathBuf,
    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_level: String,
    /// Timeout for individual HTTP requests, in seconds.
    pub request_timeout_secs: u64,
}

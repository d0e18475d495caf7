use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read existing catalog {path}: {source}")]
    ReadExisting {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to back up {path} to {backup_path}: {source}")]
    Backup {
        path: String,
        backup_path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write catalog {path}: {source}")]
    WriteCatalog {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

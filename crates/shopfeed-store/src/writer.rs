//! Writes the catalog document with change detection and backups.
//!
//! The document is a pretty-printed JSON array of products. Before a sync
//! run touches it, [`backup_existing`] copies the current file aside;
//! [`write_if_changed`] then rewrites it and reports whether the content
//! actually differed, by comparing SHA-256 fingerprints.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use shopfeed_core::Product;

use crate::error::StoreError;

/// What a catalog write accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// False when the new document matched the existing file's fingerprint.
    pub changed: bool,
    /// Number of products written.
    pub count: usize,
}

/// Copies the current catalog into `backup_dir` as
/// `products_<YYYYMMDD_HHMMSS>.json` (UTC).
///
/// Returns the backup path, or `None` when no catalog exists yet. The
/// backup directory is created on demand.
///
/// # Errors
///
/// Returns [`StoreError::Backup`] when the directory cannot be created or
/// the copy fails. Callers treat this as fatal: continuing without a backup
/// risks the only good copy of the catalog.
pub fn backup_existing(
    output_path: &Path,
    backup_dir: &Path,
) -> Result<Option<PathBuf>, StoreError> {
    if !output_path.exists() {
        tracing::debug!(path = %output_path.display(), "no existing catalog, skipping backup");
        return Ok(None);
    }

    let backup_error = |backup_path: &Path, source: io::Error| StoreError::Backup {
        path: output_path.display().to_string(),
        backup_path: backup_path.display().to_string(),
        source,
    };

    fs::create_dir_all(backup_dir).map_err(|source| backup_error(backup_dir, source))?;
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let backup_path = backup_dir.join(format!("products_{stamp}.json"));
    fs::copy(output_path, &backup_path).map_err(|source| backup_error(&backup_path, source))?;

    tracing::info!(backup = %backup_path.display(), "backed up existing catalog");
    Ok(Some(backup_path))
}

/// Serializes `products` and writes the catalog document, reporting whether
/// the content changed relative to what was on disk.
///
/// The file is rewritten either way; `changed` drives what callers log and
/// any downstream cache busting.
///
/// # Errors
///
/// Returns [`StoreError`] when the existing file cannot be read (for
/// reasons other than not existing), serialization fails, or the write
/// fails.
pub fn write_if_changed(
    products: &[Product],
    output_path: &Path,
) -> Result<WriteOutcome, StoreError> {
    let serialized = serialize_catalog(products)?;

    let previous = match fs::read(output_path) {
        Ok(bytes) => Some(bytes),
        Err(source) if source.kind() == io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(StoreError::ReadExisting {
                path: output_path.display().to_string(),
                source,
            });
        }
    };
    let changed =
        previous.as_deref().map(fingerprint) != Some(fingerprint(serialized.as_bytes()));

    fs::write(output_path, serialized.as_bytes()).map_err(|source| StoreError::WriteCatalog {
        path: output_path.display().to_string(),
        source,
    })?;

    if changed {
        tracing::info!(
            products = products.len(),
            path = %output_path.display(),
            "catalog updated"
        );
    } else {
        tracing::info!(products = products.len(), "no changes detected");
    }

    Ok(WriteOutcome {
        changed,
        count: products.len(),
    })
}

/// Hex SHA-256 of raw bytes.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Renders the catalog document: a pretty-printed JSON array, two-space
/// indent, keys in [`Product`] field order, non-ASCII characters kept
/// literal.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] if serialization fails.
pub fn serialize_catalog(products: &[Product]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(products)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;

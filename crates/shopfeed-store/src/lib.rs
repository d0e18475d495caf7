//! Catalog persistence: timestamped backups and fingerprint-gated writes.

mod error;
mod writer;

pub use error::StoreError;
pub use writer::{backup_existing, fingerprint, serialize_catalog, write_if_changed, WriteOutcome};

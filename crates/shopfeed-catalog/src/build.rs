//! Batch normalization of data rows into a catalog.

use std::collections::BTreeMap;

use shopfeed_core::{ColumnSchema, Product};

use crate::normalize::{normalize_row, RowSkip};

/// Outcome of normalizing one batch of data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSummary {
    /// Products in row order.
    pub products: Vec<Product>,
    /// Product count per category, keyed in sorted order.
    pub category_counts: BTreeMap<String, usize>,
    /// Rejected rows, in row order.
    pub skipped: Vec<SkippedRow>,
}

/// One rejected row and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based position among the data rows.
    pub ordinal: u32,
    pub reason: RowSkip,
}

/// Normalizes every data row, skipping bad rows rather than failing the
/// batch. One malformed row costs that row only; a warning is emitted with
/// its position and reason.
#[must_use]
pub fn build_catalog(rows: &[Vec<String>], schema: &ColumnSchema) -> CatalogSummary {
    let mut products = Vec::with_capacity(rows.len());
    let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut skipped = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let ordinal = u32::try_from(index + 1).unwrap_or(u32::MAX);
        match normalize_row(row, ordinal, schema) {
            Ok(product) => {
                *category_counts
                    .entry(product.category.clone())
                    .or_insert(0) += 1;
                products.push(product);
            }
            Err(reason) => {
                tracing::warn!(row = ordinal, %reason, "skipping row");
                skipped.push(SkippedRow { ordinal, reason });
            }
        }
    }

    CatalogSummary {
        products,
        category_counts,
        skipped,
    }
}

//! Column layout for the product sheet.

use thiserror::Error;

/// Maps product fields to zero-based column indices in a sheet row.
///
/// Required fields always carry an index. Optional fields may be unmapped,
/// in which case the corresponding product field is never populated and the
/// sizes fall back to the standard table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    /// Total columns the layout spans. Cells past a row's actual length
    /// read as blank.
    pub column_count: usize,
    pub id: usize,
    pub name: usize,
    pub description: usize,
    pub category: usize,
    pub actual_price: usize,
    pub sale_price: usize,
    pub in_stock: usize,
    pub images: usize,
    pub sku: Option<usize>,
    pub brand: Option<usize>,
    pub tags: Option<usize>,
    pub colors: Option<usize>,
    pub sizes: Option<usize>,
}

/// Problems with a hand-built column layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("column index {index} for '{field}' is out of range (layout spans {column_count} columns)")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        column_count: usize,
    },
    #[error("column index {index} is mapped to both '{first}' and '{second}'")]
    DuplicateIndex {
        index: usize,
        first: &'static str,
        second: &'static str,
    },
}

impl ColumnSchema {
    /// The canonical sixteen-column layout of the product sheet
    /// (columns A through P).
    ///
    /// Columns N (featured), O (bulk pricing), and P (tax rate) exist in the
    /// sheet but are not consumed by the catalog.
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            column_count: 16,
            id: 0,
            name: 1,
            description: 2,
            category: 3,
            actual_price: 4,
            sale_price: 5,
            in_stock: 6,
            images: 7,
            sku: Some(8),
            brand: Some(9),
            tags: Some(10),
            colors: Some(11),
            sizes: Some(12),
        }
    }

    /// Checks that every mapped index fits the column count and that no two
    /// fields share a column.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] describing the first violation found.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen: Vec<(usize, &'static str)> = Vec::new();
        for (field, index) in self.mapped_columns() {
            if index >= self.column_count {
                return Err(SchemaError::IndexOutOfRange {
                    field,
                    index,
                    column_count: self.column_count,
                });
            }
            if let Some(&(_, first)) = seen.iter().find(|(taken, _)| *taken == index) {
                return Err(SchemaError::DuplicateIndex {
                    index,
                    first,
                    second: field,
                });
            }
            seen.push((index, field));
        }
        Ok(())
    }

    fn mapped_columns(&self) -> Vec<(&'static str, usize)> {
        let mut columns = vec![
            ("id", self.id),
            ("name", self.name),
            ("description", self.description),
            ("category", self.category),
            ("actualPrice", self.actual_price),
            ("salePrice", self.sale_price),
            ("inStock", self.in_stock),
            ("images", self.images),
        ];
        for (field, index) in [
            ("sku", self.sku),
            ("brand", self.brand),
            ("tags", self.tags),
            ("colors", self.colors),
            ("sizes", self.sizes),
        ] {
            if let Some(index) = index {
                columns.push((field, index));
            }
        }
        columns
    }
}

//! Row-to-product conversion.
//!
//! A row is a flat list of cells positioned by [`ColumnSchema`]. Two fields
//! gate the row (name and a positive actual price); everything else degrades
//! to a default or an absent field. Cell grammars live in [`crate::parse`].

use rust_decimal::Decimal;
use shopfeed_core::{standard_sizes, ColumnSchema, Product, DEFAULT_CATEGORY};
use thiserror::Error;

use crate::parse::{
    parse_bool_flag, parse_color_list, parse_image_list, parse_price, parse_size_list,
    parse_tag_list,
};

/// Why a row was rejected during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RowSkip {
    /// Blank name cell, or no positive price in the actual-price cell.
    #[error("missing name or price")]
    MissingNameOrPrice,
}

/// Converts one sheet row into a [`Product`].
///
/// `ordinal` is the 1-based position of the row among the data rows; it
/// becomes the product id when the id cell is blank or not a positive
/// integer. Rows shorter than the schema read missing cells as blank.
///
/// # Errors
///
/// Returns [`RowSkip::MissingNameOrPrice`] when the name cell is blank or
/// the actual-price cell holds no positive price.
pub fn normalize_row(
    row: &[String],
    ordinal: u32,
    schema: &ColumnSchema,
) -> Result<Product, RowSkip> {
    let name = cell(row, schema.name);
    if name.is_empty() {
        return Err(RowSkip::MissingNameOrPrice);
    }

    let actual_price = parse_price(cell(row, schema.actual_price));
    if actual_price <= Decimal::ZERO {
        return Err(RowSkip::MissingNameOrPrice);
    }

    // A sale price that is absent, unparseable, or above the list price
    // falls back to the list price (no discount).
    let parsed_sale = parse_price(cell(row, schema.sale_price));
    let sale_price = if parsed_sale > Decimal::ZERO && parsed_sale <= actual_price {
        parsed_sale
    } else {
        actual_price
    };
    let on_sale = sale_price < actual_price;

    let id = product_id(cell(row, schema.id), ordinal);
    let description = cell(row, schema.description).to_string();
    let category = match cell(row, schema.category) {
        "" => DEFAULT_CATEGORY.to_string(),
        value => value.to_string(),
    };
    let in_stock = parse_bool_flag(cell(row, schema.in_stock), true);
    let images = parse_image_list(cell(row, schema.images));

    let sku = optional_cell(row, schema.sku);

    let mut tags = match schema.tags {
        Some(index) => parse_tag_list(cell(row, index)),
        None => Vec::new(),
    };

    // A comma in the brand cell means the sheet author filled it with tags;
    // fold them in and leave the scalar brand absent. A plain brand keeps
    // the scalar and is also added as a tag.
    let brand = match optional_cell(row, schema.brand) {
        Some(value) if value.contains(',') => {
            for tag in parse_tag_list(&value) {
                push_unique(&mut tags, tag);
            }
            None
        }
        Some(value) => {
            push_unique(&mut tags, value.clone());
            Some(value)
        }
        None => None,
    };
    let tags = if tags.is_empty() { None } else { Some(tags) };

    let colors = schema
        .colors
        .and_then(|index| parse_color_list(cell(row, index)));

    let mut sizes = match schema.sizes {
        Some(index) => parse_size_list(cell(row, index)),
        None => Vec::new(),
    };
    if sizes.is_empty() {
        sizes = standard_sizes();
    }

    Ok(Product {
        id,
        name: name.to_string(),
        description,
        category,
        actual_price,
        sale_price,
        on_sale,
        in_stock,
        images,
        sku,
        brand,
        tags,
        colors,
        sizes,
    })
}

/// Reads a cell by index, treating out-of-range as blank. The Sheets API
/// omits trailing empty cells, so short rows are routine.
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", |value| value.trim())
}

fn optional_cell(row: &[String], index: Option<usize>) -> Option<String> {
    let value = cell(row, index?);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn product_id(raw: &str, ordinal: u32) -> u32 {
    raw.parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
        .unwrap_or(ordinal)
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tags.iter().any(|existing| *existing == tag) {
        tags.push(tag);
    }
}

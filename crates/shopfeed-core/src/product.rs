//! Product records as they appear in the catalog document.
//!
//! Serialization here defines the on-disk contract: camelCase keys, prices
//! as JSON numbers, optional fields omitted entirely when absent. Key order
//! in the generated document follows field order in [`Product`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category applied when a row's category cell is blank.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// One normalized product in the catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Price before any discount, in rupees.
    #[serde(with = "rust_decimal::serde::float")]
    pub actual_price: Decimal,
    /// Effective selling price. Never above `actual_price`.
    #[serde(with = "rust_decimal::serde::float")]
    pub sale_price: Decimal,
    pub on_sale: bool,
    pub in_stock: bool,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<ColorOption>>,
    pub sizes: Vec<SizeOption>,
}

impl Product {
    /// The image shown first in product listings, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whole-percent discount relative to `actual_price`, when on sale.
    #[must_use]
    pub fn discount_percent(&self) -> Option<Decimal> {
        if !self.on_sale || self.actual_price <= Decimal::ZERO {
            return None;
        }
        let ratio = (self.actual_price - self.sale_price) / self.actual_price;
        Some((ratio * Decimal::ONE_HUNDRED).round())
    }
}

/// A selectable color swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    /// Hex color without a leading `#`. Sheets sometimes label this column
    /// value `hexColor`; both spellings are accepted on input.
    #[serde(alias = "hexColor")]
    pub hex: String,
}

/// A size choice with its garment measurements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub size: String,
    pub measurements: Measurements,
}

/// Garment measurements in inches, kept as display strings (`"36-38"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurements {
    pub chest: String,
    pub waist: String,
    pub hips: String,
    pub length: String,
}

// (size, chest, waist, hips, length), all in inches.
const STANDARD_SIZE_TABLE: [(&str, &str, &str, &str, &str); 5] = [
    ("S", "36-38", "28-30", "36-38", "27"),
    ("M", "38-40", "30-32", "38-40", "28"),
    ("L", "40-42", "32-34", "40-42", "29"),
    ("XL", "42-44", "34-36", "42-44", "30"),
    ("XXL", "44-46", "36-38", "44-46", "31"),
];

/// The full S through XXL measurement table, used when a row carries no
/// explicit size data.
#[must_use]
pub fn standard_sizes() -> Vec<SizeOption> {
    STANDARD_SIZE_TABLE.iter().map(size_from_entry).collect()
}

/// Resolves a bare size token (`"XL"`, `"xl"`) against the standard table.
///
/// Returns `None` for tokens outside S through XXL.
#[must_use]
pub fn standard_size(token: &str) -> Option<SizeOption> {
    STANDARD_SIZE_TABLE
        .iter()
        .find(|(size, ..)| size.eq_ignore_ascii_case(token))
        .map(size_from_entry)
}

fn size_from_entry(entry: &(&str, &str, &str, &str, &str)) -> SizeOption {
    let (size, chest, waist, hips, length) = *entry;
    SizeOption {
        size: size.to_string(),
        measurements: Measurements {
            chest: chest.to_string(),
            waist: waist.to_string(),
            hips: hips.to_string(),
            length: length.to_string(),
        },
    }
}

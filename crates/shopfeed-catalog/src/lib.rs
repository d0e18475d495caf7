//! Row-to-product normalization for the catalog pipeline.
//!
//! [`parse`] holds the cell-level grammars (prices, image lists, colors,
//! sizes), [`normalize`] turns one sheet row into a
//! [`shopfeed_core::Product`], and [`build`] runs a whole batch with
//! skip-and-continue resilience.

pub mod build;
pub mod normalize;
pub mod parse;

pub use build::{build_catalog, CatalogSummary, SkippedRow};
pub use normalize::{normalize_row, RowSkip};

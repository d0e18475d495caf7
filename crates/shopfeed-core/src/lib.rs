//! Shared domain types and configuration for the shopfeed workspace.
//!
//! This crate holds the [`Product`] model written to the catalog document,
//! the [`ColumnSchema`] describing how sheet columns map to product fields,
//! and the [`AppConfig`] loaded from the environment at startup.

mod app_config;
mod config;
mod product;
mod schema;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use product::{
    standard_size, standard_sizes, ColorOption, Measurements, Product, SizeOption,
    DEFAULT_CATEGORY,
};
pub use schema::{ColumnSchema, SchemaError};

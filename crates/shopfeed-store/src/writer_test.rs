use std::fs;

use rust_decimal::Decimal;
use shopfeed_core::{standard_sizes, Product};
use tempfile::TempDir;

use super::*;

fn make_product(id: u32, name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: String::new(),
        category: "Kurtas".to_string(),
        actual_price: Decimal::new(999, 0),
        sale_price: Decimal::new(999, 0),
        on_sale: false,
        in_stock: true,
        images: Vec::new(),
        sku: None,
        brand: None,
        tags: None,
        colors: None,
        sizes: standard_sizes(),
    }
}

// ---------------------------------------------------------------------------
// write_if_changed
// ---------------------------------------------------------------------------

#[test]
fn first_write_reports_changed() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("products.json");

    let outcome = write_if_changed(&[make_product(1, "Kurta")], &output).unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.count, 1);
    assert!(output.exists(), "expected catalog file to be written");
}

#[test]
fn identical_rewrite_reports_unchanged() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("products.json");
    let products = vec![make_product(1, "Kurta")];

    let first = write_if_changed(&products, &output).unwrap();
    let second = write_if_changed(&products, &output).unwrap();

    assert!(first.changed);
    assert!(!second.changed, "expected identical rewrite to be a no-op");
    assert_eq!(second.count, 1);
}

#[test]
fn content_change_reports_changed() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("products.json");

    write_if_changed(&[make_product(1, "Kurta")], &output).unwrap();
    let outcome = write_if_changed(&[make_product(1, "Saree")], &output).unwrap();

    assert!(outcome.changed);
}

#[test]
fn empty_catalog_writes_an_empty_array() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("products.json");

    let outcome = write_if_changed(&[], &output).unwrap();

    assert_eq!(outcome.count, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn document_is_pretty_printed_with_camel_case_keys() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("products.json");

    write_if_changed(&[make_product(1, "Kurta")], &output).unwrap();
    let document = fs::read_to_string(&output).unwrap();

    assert!(document.starts_with("[\n  {"), "expected two-space indent, got: {document}");
    assert!(document.contains("\"actualPrice\": 999.0"));
    assert!(document.contains("\"inStock\": true"));
    assert!(!document.contains("\"sku\""), "expected absent sku to be omitted");
}

#[test]
fn non_ascii_text_stays_literal() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("products.json");
    let mut product = make_product(1, "बनारसी साड़ी");
    product.description = "Price was ₹2,499".to_string();

    write_if_changed(&[product], &output).unwrap();
    let document = fs::read_to_string(&output).unwrap();

    assert!(document.contains("बनारसी साड़ी"), "expected literal Devanagari, got: {document}");
    assert!(document.contains('₹'), "expected literal rupee sign");
    assert!(!document.contains("\\u"), "expected no unicode escapes, got: {document}");
}

// ---------------------------------------------------------------------------
// backup_existing
// ---------------------------------------------------------------------------

#[test]
fn backup_copies_existing_catalog() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("products.json");
    let backups = dir.path().join("backups");
    fs::write(&output, "[]").unwrap();

    let backup_path = backup_existing(&output, &backups)
        .unwrap()
        .expect("expected a backup to be taken");

    let name = backup_path
        .file_name()
        .expect("backup file name")
        .to_string_lossy()
        .into_owned();
    assert!(
        name.starts_with("products_") && name.ends_with(".json"),
        "unexpected backup name: {name}"
    );
    assert_eq!(fs::read_to_string(&backup_path).unwrap(), "[]");
    // The original is untouched.
    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}

#[test]
fn backup_skipped_when_no_catalog_exists() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("products.json");
    let backups = dir.path().join("backups");

    let result = backup_existing(&output, &backups).unwrap();

    assert!(result.is_none());
    assert!(!backups.exists(), "expected no backup dir for a fresh run");
}

#[test]
fn backup_creates_nested_backup_dir() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("products.json");
    let backups = dir.path().join("state").join("backups");
    fs::write(&output, "[]").unwrap();

    let backup_path = backup_existing(&output, &backups)
        .unwrap()
        .expect("expected a backup");

    assert!(backup_path.starts_with(&backups));
    assert!(backups.is_dir());
}

// ---------------------------------------------------------------------------
// fingerprint
// ---------------------------------------------------------------------------

#[test]
fn fingerprint_is_hex_sha256() {
    assert_eq!(
        fingerprint(b"hello"),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}

#[test]
fn fingerprint_differs_on_any_byte_change() {
    assert_ne!(fingerprint(b"[]"), fingerprint(b"[] "));
}

//! Cell-level parsing grammars for raw sheet values.
//!
//! Sheet cells arrive as free-form text: prices carry currency symbols and
//! thousands separators, list-valued cells are either JSON or comma-joined
//! tokens. Every parser here is total — malformed input degrades to an
//! empty/zero value and never aborts the row. See [`crate::normalize`] for
//! how these compose into full row normalization.

use rust_decimal::Decimal;
use serde_json::Value;
use shopfeed_core::{standard_size, ColorOption, SizeOption};

/// Currency symbol stripped from price cells.
const CURRENCY_SYMBOL: &str = "₹";

/// Tokens recognized as true in flag cells (case-insensitive).
const TRUTHY_TOKENS: [&str; 3] = ["true", "1", "yes"];

/// Parses a price cell into a [`Decimal`].
///
/// Cleaning rules, in order:
/// 1. Strip the `₹` currency symbol wherever it appears.
/// 2. Strip `,` thousands separators.
/// 3. Trim surrounding whitespace.
///
/// Anything that still fails to parse (including the empty string) yields
/// `Decimal::ZERO`; callers treat zero as "no usable price".
#[must_use]
pub fn parse_price(raw: &str) -> Decimal {
    let cleaned = raw.replace(CURRENCY_SYMBOL, "").replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    cleaned.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Parses an images cell into an ordered URL list.
///
/// Accepted forms:
/// - JSON object `{"primary": "...", "gallery": ["...", ...]}` — primary
///   first, then gallery entries in order.
/// - JSON array `["...", ...]` — entries in order.
/// - Anything else — comma-separated URLs.
///
/// Non-string JSON entries and blank URLs are dropped. A cell that looks
/// like JSON (leading `{` or `[`) but fails to parse yields an empty list
/// rather than being fed through the comma grammar.
#[must_use]
pub fn parse_image_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if !looks_like_json(trimmed) {
        return trimmed
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_owned)
            .collect();
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(object)) => {
            let mut images = Vec::new();
            if let Some(primary) = object.get("primary").and_then(Value::as_str) {
                push_url(&mut images, primary);
            }
            if let Some(gallery) = object.get("gallery").and_then(Value::as_array) {
                for entry in gallery {
                    if let Some(url) = entry.as_str() {
                        push_url(&mut images, url);
                    }
                }
            }
            images
        }
        Ok(Value::Array(entries)) => {
            let mut images = Vec::new();
            for entry in &entries {
                if let Some(url) = entry.as_str() {
                    push_url(&mut images, url);
                }
            }
            images
        }
        Ok(_) | Err(_) => Vec::new(),
    }
}

/// Parses a colors cell into swatches.
///
/// Accepted forms:
/// - JSON array of `{"name": "...", "hex": "..."}` objects (`hexColor` is
///   accepted as an alias for `hex`); malformed elements are dropped, valid
///   ones kept.
/// - Fallback grammar: comma-separated `Name:hexcode` tokens.
///
/// A leading `#` on hex codes is stripped. Returns `None` when no swatch
/// survives, so the product field is omitted rather than empty.
#[must_use]
pub fn parse_color_list(raw: &str) -> Option<Vec<ColorOption>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let colors: Vec<ColorOption> = if looks_like_json(trimmed) {
        match serde_json::from_str::<Vec<Value>>(trimmed) {
            Ok(entries) => entries.into_iter().filter_map(color_from_json).collect(),
            Err(_) => Vec::new(),
        }
    } else {
        trimmed.split(',').filter_map(color_from_token).collect()
    };
    if colors.is_empty() {
        None
    } else {
        Some(colors)
    }
}

/// Parses a sizes cell into size options.
///
/// Accepted forms:
/// - JSON array mixing full `{"size": ..., "measurements": {...}}` objects
///   and bare token strings (`"XL"`); tokens resolve against the standard
///   measurement table, unknown tokens and malformed objects are dropped.
/// - Fallback grammar: comma-separated tokens resolved against the
///   standard table.
///
/// Returns an empty list when nothing survives; the row normalizer then
/// substitutes the full standard table.
#[must_use]
pub fn parse_size_list(raw: &str) -> Vec<SizeOption> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if looks_like_json(trimmed) {
        return match serde_json::from_str::<Vec<Value>>(trimmed) {
            Ok(entries) => entries.into_iter().filter_map(size_from_json).collect(),
            Err(_) => Vec::new(),
        };
    }
    trimmed
        .split(',')
        .filter_map(|token| standard_size(token.trim()))
        .collect()
}

/// Parses a boolean flag cell.
///
/// A blank cell yields `default`. Otherwise the cell is true exactly when
/// it reads `true`, `1`, or `yes` (case-insensitive); every other token is
/// false.
#[must_use]
pub fn parse_bool_flag(raw: &str, default: bool) -> bool {
    let token = raw.trim();
    if token.is_empty() {
        return default;
    }
    TRUTHY_TOKENS
        .iter()
        .any(|truthy| token.eq_ignore_ascii_case(truthy))
}

/// Parses a tags cell into trimmed, deduplicated tags.
///
/// Tokens are comma-separated; duplicates keep their first occurrence,
/// empty segments are dropped.
#[must_use]
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if !token.is_empty() && !tags.iter().any(|existing| existing == token) {
            tags.push(token.to_string());
        }
    }
    tags
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// A cell whose first character opens a JSON container is parsed as JSON
/// only; it never falls back to the comma grammar.
fn looks_like_json(cell: &str) -> bool {
    cell.starts_with('[') || cell.starts_with('{')
}

fn push_url(images: &mut Vec<String>, url: &str) {
    let url = url.trim();
    if !url.is_empty() {
        images.push(url.to_string());
    }
}

fn color_from_json(entry: Value) -> Option<ColorOption> {
    let color: ColorOption = serde_json::from_value(entry).ok()?;
    clean_color(color)
}

fn color_from_token(token: &str) -> Option<ColorOption> {
    let (name, hex) = token.split_once(':')?;
    clean_color(ColorOption {
        name: name.to_string(),
        hex: hex.to_string(),
    })
}

/// Trims both parts, strips a leading `#`, and rejects swatches where
/// either part ends up empty.
fn clean_color(color: ColorOption) -> Option<ColorOption> {
    let name = color.name.trim().to_string();
    let hex = color.hex.trim().trim_start_matches('#').to_string();
    if name.is_empty() || hex.is_empty() {
        return None;
    }
    Some(ColorOption { name, hex })
}

fn size_from_json(entry: Value) -> Option<SizeOption> {
    match entry {
        Value::String(token) => standard_size(token.trim()),
        entry @ Value::Object(_) => serde_json::from_value(entry).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // parse_price
    // -----------------------------------------------------------------------

    #[test]
    fn price_strips_currency_symbol_and_separators() {
        assert_eq!(parse_price("₹1,234.50"), Decimal::new(123_450, 2));
    }

    #[test]
    fn price_plain_integer() {
        assert_eq!(parse_price("499"), Decimal::new(499, 0));
    }

    #[test]
    fn price_surrounding_whitespace() {
        assert_eq!(parse_price("  ₹999  "), Decimal::new(999, 0));
    }

    #[test]
    fn price_empty_cell_is_zero() {
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("   "), Decimal::ZERO);
    }

    #[test]
    fn price_unparseable_text_is_zero() {
        assert_eq!(parse_price("N/A"), Decimal::ZERO);
        assert_eq!(parse_price("1.2.3"), Decimal::ZERO);
    }

    #[test]
    fn price_negative_value_passes_through() {
        // The row normalizer rejects non-positive prices; the parser itself
        // only cleans and parses.
        assert_eq!(parse_price("-50"), Decimal::new(-50, 0));
    }

    // -----------------------------------------------------------------------
    // parse_image_list
    // -----------------------------------------------------------------------

    #[test]
    fn images_json_object_primary_then_gallery() {
        let cell = r#"{"primary": "https://cdn.example.com/a.jpg", "gallery": ["https://cdn.example.com/b.jpg", "https://cdn.example.com/c.jpg"]}"#;
        assert_eq!(
            parse_image_list(cell),
            vec![
                "https://cdn.example.com/a.jpg",
                "https://cdn.example.com/b.jpg",
                "https://cdn.example.com/c.jpg",
            ]
        );
    }

    #[test]
    fn images_json_object_primary_only() {
        let cell = r#"{"primary": "https://cdn.example.com/a.jpg"}"#;
        assert_eq!(parse_image_list(cell), vec!["https://cdn.example.com/a.jpg"]);
    }

    #[test]
    fn images_json_object_gallery_only() {
        let cell = r#"{"gallery": ["https://cdn.example.com/b.jpg"]}"#;
        assert_eq!(parse_image_list(cell), vec!["https://cdn.example.com/b.jpg"]);
    }

    #[test]
    fn images_json_object_without_known_keys_is_empty() {
        assert!(parse_image_list(r#"{"thumbnail": "x.jpg"}"#).is_empty());
    }

    #[test]
    fn images_json_array_in_order() {
        let cell = r#"["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"]"#;
        assert_eq!(
            parse_image_list(cell),
            vec![
                "https://cdn.example.com/a.jpg",
                "https://cdn.example.com/b.jpg",
            ]
        );
    }

    #[test]
    fn images_json_array_drops_non_string_entries() {
        let cell = r#"["https://cdn.example.com/a.jpg", 42, null, "https://cdn.example.com/b.jpg"]"#;
        assert_eq!(
            parse_image_list(cell),
            vec![
                "https://cdn.example.com/a.jpg",
                "https://cdn.example.com/b.jpg",
            ]
        );
    }

    #[test]
    fn images_json_object_drops_blank_gallery_entries() {
        let cell = r#"{"primary": "a.jpg", "gallery": ["", "  ", "b.jpg"]}"#;
        assert_eq!(parse_image_list(cell), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn images_comma_fallback() {
        assert_eq!(
            parse_image_list("a.jpg, b.jpg ,c.jpg"),
            vec!["a.jpg", "b.jpg", "c.jpg"]
        );
    }

    #[test]
    fn images_comma_fallback_drops_empty_segments() {
        assert_eq!(parse_image_list("a.jpg,,b.jpg,"), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn images_broken_json_is_empty_not_comma_parsed() {
        assert!(parse_image_list(r#"{"primary": "a.jpg""#).is_empty());
        assert!(parse_image_list("[a.jpg, b.jpg]").is_empty());
    }

    #[test]
    fn images_blank_cell_is_empty() {
        assert!(parse_image_list("").is_empty());
        assert!(parse_image_list("   ").is_empty());
    }

    // -----------------------------------------------------------------------
    // parse_color_list
    // -----------------------------------------------------------------------

    #[test]
    fn colors_json_array() {
        let cell = r#"[{"name": "Red", "hex": "FF0000"}, {"name": "Navy", "hex": "1F2A44"}]"#;
        let colors = parse_color_list(cell).expect("expected colors to parse");
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].name, "Red");
        assert_eq!(colors[0].hex, "FF0000");
        assert_eq!(colors[1].name, "Navy");
    }

    #[test]
    fn colors_json_accepts_hex_color_alias() {
        let cell = r#"[{"name": "Moss", "hexColor": "4A5D23"}]"#;
        let colors = parse_color_list(cell).expect("expected colors to parse");
        assert_eq!(colors[0].hex, "4A5D23");
    }

    #[test]
    fn colors_json_strips_leading_hash() {
        let cell = r##"[{"name": "Red", "hex": "#FF0000"}]"##;
        let colors = parse_color_list(cell).expect("expected colors to parse");
        assert_eq!(colors[0].hex, "FF0000");
    }

    #[test]
    fn colors_json_drops_malformed_elements_keeps_valid() {
        let cell = r#"[{"name": "Red", "hex": "FF0000"}, {"name": "NoHex"}, "loose"]"#;
        let colors = parse_color_list(cell).expect("expected colors to parse");
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].name, "Red");
    }

    #[test]
    fn colors_json_all_malformed_is_none() {
        let result = parse_color_list(r#"[{"name": "NoHex"}, 7]"#);
        assert!(result.is_none(), "expected None, got: {result:?}");
    }

    #[test]
    fn colors_broken_json_is_none() {
        assert!(parse_color_list(r#"[{"name": "Red""#).is_none());
    }

    #[test]
    fn colors_flat_grammar() {
        let colors = parse_color_list("Red:FF0000, Blue:#0000FF").expect("expected colors");
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].name, "Red");
        assert_eq!(colors[0].hex, "FF0000");
        assert_eq!(colors[1].name, "Blue");
        assert_eq!(colors[1].hex, "0000FF");
    }

    #[test]
    fn colors_flat_grammar_drops_tokens_without_colon() {
        let colors = parse_color_list("Red, Blue:0000FF").expect("expected colors");
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].name, "Blue");
    }

    #[test]
    fn colors_flat_grammar_rejects_empty_parts() {
        assert!(parse_color_list(":FF0000").is_none());
        assert!(parse_color_list("Red:").is_none());
    }

    #[test]
    fn colors_blank_cell_is_none() {
        assert!(parse_color_list("").is_none());
        assert!(parse_color_list("  ").is_none());
    }

    // -----------------------------------------------------------------------
    // parse_size_list
    // -----------------------------------------------------------------------

    #[test]
    fn sizes_json_objects() {
        let cell = r#"[{"size": "M", "measurements": {"chest": "38-40", "waist": "30-32", "hips": "38-40", "length": "28"}}]"#;
        let sizes = parse_size_list(cell);
        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes[0].size, "M");
        assert_eq!(sizes[0].measurements.chest, "38-40");
    }

    #[test]
    fn sizes_json_bare_tokens_resolve_against_standard_table() {
        let sizes = parse_size_list(r#"["S", "XL"]"#);
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[0].size, "S");
        assert_eq!(sizes[0].measurements.length, "27");
        assert_eq!(sizes[1].size, "XL");
    }

    #[test]
    fn sizes_json_mixed_tokens_and_objects() {
        let cell = r#"["L", {"size": "Free", "measurements": {"chest": "40-48", "waist": "30-40", "hips": "40-48", "length": "29"}}]"#;
        let sizes = parse_size_list(cell);
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[0].size, "L");
        assert_eq!(sizes[1].size, "Free");
    }

    #[test]
    fn sizes_json_drops_unknown_tokens_and_malformed_objects() {
        let cell = r#"["XS", {"size": "M"}, 12]"#;
        assert!(parse_size_list(cell).is_empty());
    }

    #[test]
    fn sizes_comma_tokens_case_insensitive() {
        let sizes = parse_size_list("s, m");
        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[0].size, "S");
        assert_eq!(sizes[1].size, "M");
    }

    #[test]
    fn sizes_unknown_comma_tokens_yield_empty() {
        assert!(parse_size_list("XS, 38").is_empty());
    }

    #[test]
    fn sizes_broken_json_is_empty() {
        assert!(parse_size_list(r#"["S""#).is_empty());
    }

    #[test]
    fn sizes_blank_cell_is_empty() {
        assert!(parse_size_list("").is_empty());
    }

    // -----------------------------------------------------------------------
    // parse_bool_flag
    // -----------------------------------------------------------------------

    #[test]
    fn bool_blank_takes_default() {
        assert!(parse_bool_flag("", true));
        assert!(!parse_bool_flag("   ", false));
    }

    #[test]
    fn bool_truthy_tokens() {
        assert!(parse_bool_flag("TRUE", false));
        assert!(parse_bool_flag("true", false));
        assert!(parse_bool_flag("1", false));
        assert!(parse_bool_flag("Yes", false));
    }

    #[test]
    fn bool_everything_else_is_false() {
        assert!(!parse_bool_flag("FALSE", true));
        assert!(!parse_bool_flag("0", true));
        assert!(!parse_bool_flag("out of stock", true));
    }

    // -----------------------------------------------------------------------
    // parse_tag_list
    // -----------------------------------------------------------------------

    #[test]
    fn tags_split_and_trimmed() {
        assert_eq!(
            parse_tag_list("summer, cotton ,  casual"),
            vec!["summer", "cotton", "casual"]
        );
    }

    #[test]
    fn tags_deduplicated_first_occurrence_wins() {
        assert_eq!(parse_tag_list("summer, cotton, summer"), vec!["summer", "cotton"]);
    }

    #[test]
    fn tags_empty_segments_dropped() {
        assert_eq!(parse_tag_list("summer,,cotton,"), vec!["summer", "cotton"]);
    }

    #[test]
    fn tags_blank_cell_is_empty() {
        assert!(parse_tag_list("").is_empty());
        assert!(parse_tag_list("  ").is_empty());
    }
}

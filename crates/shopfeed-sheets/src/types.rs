//! Raw wire shapes for the Sheets v4 API and the OAuth token endpoint.

use serde::Deserialize;
use serde_json::Value;

/// Response envelope for `values.get`.
///
/// The API omits `values` entirely when the requested range holds no data,
/// and omits trailing empty cells within each row.
#[derive(Debug, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Response envelope for spreadsheet metadata (`spreadsheets.get`).
#[derive(Debug, Deserialize)]
pub struct Spreadsheet {
    pub properties: SpreadsheetProperties,
}

#[derive(Debug, Deserialize)]
pub struct SpreadsheetProperties {
    pub title: String,
}

/// Successful response from the OAuth token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Renders one cell to text.
///
/// Formatted values arrive as strings in practice; numbers and booleans
/// are rendered directly, null reads as blank, and nested containers
/// round-trip as JSON text so list-valued cells still reach the JSON
/// grammars downstream.
#[must_use]
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        container => container.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn value_range_defaults_to_no_rows() {
        let range: ValueRange = serde_json::from_value(json!({"range": "Sheet1!A1:P1"}))
            .expect("expected envelope to deserialize");
        assert!(range.values.is_empty());
    }

    #[test]
    fn render_cell_passes_strings_through() {
        assert_eq!(render_cell(&json!("Linen Kurta")), "Linen Kurta");
    }

    #[test]
    fn render_cell_renders_scalars() {
        assert_eq!(render_cell(&json!(499)), "499");
        assert_eq!(render_cell(&json!(24.5)), "24.5");
        assert_eq!(render_cell(&json!(true)), "true");
        assert_eq!(render_cell(&json!(null)), "");
    }

    #[test]
    fn render_cell_keeps_containers_as_json_text() {
        let rendered = render_cell(&json!({"primary": "a.jpg"}));
        assert_eq!(rendered, r#"{"primary":"a.jpg"}"#);
    }
}

//! Tolerant decoding of raw column configuration.
//!
//! Invalid configuration never stops the table: elements that decode are kept,
//! the rest are skipped with a warning, and the validation report travels along
//! so the caller can decide how loudly to complain.

use super::normalize::normalize_columns;
use super::validate::{is_truthy, validate_columns, ColumnValidation};
use crate::domain::{Column, Result};
use crate::Locale;
use serde_json::{Map, Value};

/// Normalized columns together with the validation report of their source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSet {
    pub columns: Vec<Column>,
    pub validation: ColumnValidation,
}

/// Decodes every element of `raw` that is an object.
///
/// A field that does not fit its typed slot moves into [`Column::extra`] and
/// the column is kept. The column is skipped only when such a field is one
/// [`validate_columns`] rejects (`dataIndex`, `name`, `order`, `component`),
/// so every descriptor that validates cleanly decodes.
///
/// Returns an empty list when `raw` is not an array.
#[must_use]
pub fn decode_columns(raw: &Value) -> Vec<Column> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| decode_column(index + 1, item))
        .collect()
}

fn decode_column(position: usize, item: &Value) -> Option<Column> {
    let Some(object) = item.as_object() else {
        tracing::warn!(position, "skipping column that is not an object");
        return None;
    };

    if let Ok(column) = serde_json::from_value::<Column>(item.clone()) {
        return Some(column);
    }

    let (accepted, rejected): (Map<String, Value>, Map<String, Value>) = object
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .partition(|(key, value)| decodes_alone(key, value));

    let checked = rejected.iter().find(|(key, value)| is_checked(key, value));
    if let Some((key, _)) = checked {
        tracing::warn!(position, field = %key, "skipping column with undecodable field");
        return None;
    }

    let mut column = match serde_json::from_value::<Column>(Value::Object(accepted)) {
        Ok(column) => column,
        Err(e) => {
            tracing::warn!(position, error = %e, "skipping undecodable column");
            return None;
        }
    };
    for (key, value) in rejected {
        tracing::warn!(position, field = %key, "keeping undecodable field as extra");
        column.extra.insert(key, value);
    }
    Some(column)
}

fn decodes_alone(key: &str, value: &Value) -> bool {
    let mut single = Map::new();
    single.insert(key.to_string(), value.clone());
    serde_json::from_value::<Column>(Value::Object(single)).is_ok()
}

fn is_checked(key: &str, value: &Value) -> bool {
    match key {
        "order" => true,
        "dataIndex" | "name" | "component" => is_truthy(value),
        _ => false,
    }
}

/// Validates, decodes and normalizes raw column configuration.
///
/// # Example
///
/// ```rust
/// use protable::columns::prepare_columns;
/// use protable::Locale;
/// use serde_json::json;
///
/// let set = prepare_columns(
///     &json!([{ "title": "ID" }, { "title": "Name", "dataIndex": 3 }]),
///     Locale::default(),
/// );
///
/// assert!(!set.validation.valid);
/// assert_eq!(set.columns.len(), 1);
/// assert_eq!(set.columns[0].label.as_deref(), Some("ID"));
/// ```
#[must_use]
pub fn prepare_columns(raw: &Value, locale: Locale) -> ColumnSet {
    let validation = validate_columns(raw);
    if !validation.valid {
        tracing::warn!(errors = ?validation.errors, "column configuration has problems");
    }

    ColumnSet {
        columns: normalize_columns(&decode_columns(raw), locale),
        validation,
    }
}

/// Parses a JSON document and prepares it with [`prepare_columns`].
///
/// # Errors
///
/// Returns [`TableError::Json`](crate::TableError::Json) if `text` is not JSON.
/// Structural problems do not fail; they are reported in the returned set.
pub fn prepare_columns_from_str(text: &str, locale: Locale) -> Result<ColumnSet> {
    let raw: Value = serde_json::from_str(text)?;
    Ok(prepare_columns(&raw, locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_skips_bad_elements() {
        let decoded = decode_columns(&json!([
            { "title": "ID", "dataIndex": "id" },
            { "title": "Bad", "dataIndex": 123 },
            "not a column",
            { "invalidProp": "test" }
        ]));
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1].extra["invalidProp"], json!("test"));
    }

    #[test]
    fn test_decode_moves_mistyped_fields_to_extra() {
        let decoded = decode_columns(&json!([
            { "title": "Name", "dataIndex": "name", "align": "justify", "hideInTable": "yes" }
        ]));
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].data_index.as_deref(), Some("name"));
        assert_eq!(decoded[0].align, None);
        assert_eq!(decoded[0].extra["align"], json!("justify"));
        assert_eq!(decoded[0].extra["hideInTable"], json!("yes"));
    }

    #[test]
    fn test_every_valid_descriptor_survives_prepare() {
        let descriptors = [
            json!({ "title": "ID", "dataIndex": "id" }),
            json!({ "title": "Name", "dataIndex": "name", "width": 120.5 }),
            json!({ "title": "Score", "dataIndex": "score", "sorter": { "multiple": 1 } }),
            json!({ "title": "Wide", "dataIndex": "wide", "width": { "min": 80 } }),
            json!({ "title": 5, "dataIndex": "count" }),
            json!({ "title": "Flag", "dataIndex": false }),
            json!({ "title": "Pinned", "dataIndex": "pinned", "fixed": true }),
            json!({ "title": "Rules", "dataIndex": "rules", "rules": "required" }),
            json!({ "title": "Props", "dataIndex": "props", "fieldProps": "none", "visible": 1 }),
        ];

        for descriptor in descriptors {
            let raw = json!([descriptor]);
            assert!(validate_columns(&raw).valid, "{raw} should validate");
            let set = prepare_columns(&raw, Locale::EnUs);
            assert_eq!(set.columns.len(), 1, "{raw} should survive decoding");
        }

        let set = prepare_columns(
            &json!([
                { "title": "ID", "dataIndex": "id" },
                { "title": "Name", "dataIndex": "name", "width": 120.5 },
                { "title": "Score", "dataIndex": "score", "sorter": { "multiple": 1 } }
            ]),
            Locale::EnUs,
        );
        assert!(set.validation.valid);
        assert_eq!(set.columns.len(), 3);
    }

    #[test]
    fn test_decode_non_array() {
        assert!(decode_columns(&json!({ "title": "ID" })).is_empty());
    }

    #[test]
    fn test_prepare_from_str() {
        let set =
            prepare_columns_from_str(r#"[{"title": "ID", "dataIndex": "id"}]"#, Locale::ZhCn)
                .unwrap();
        assert!(set.validation.valid);
        assert_eq!(set.columns[0].name.as_deref(), Some("id"));
    }

    #[test]
    fn test_prepare_from_invalid_json() {
        assert!(prepare_columns_from_str("[{", Locale::ZhCn).is_err());
    }
}

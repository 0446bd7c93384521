//! Cell text formatting.
//!
//! Missing values render as [`EMPTY_TEXT`]. Columns with a `customRender` own
//! their text completely; otherwise the column's `valueType` picks the format.
//! Timestamps are rendered in UTC.

use crate::domain::{CellContext, Column};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// Placeholder for missing, `null` and empty values.
pub const EMPTY_TEXT: &str = "-";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static NULL: Value = Value::Null;

/// Text of `record[key]`, or [`EMPTY_TEXT`] when it is missing, `null` or `""`.
///
/// `middleware` transforms present values only.
///
/// # Example
///
/// ```rust
/// use protable::ui::format::display_value;
/// use serde_json::{json, Value};
///
/// let record = json!({ "name": "ann", "note": null }).as_object().cloned().unwrap();
/// let upper = |v: &Value| v.as_str().unwrap_or_default().to_uppercase();
///
/// assert_eq!(display_value(&record, "name", Some(&upper)), "ANN");
/// assert_eq!(display_value(&record, "note", Some(&upper)), "-");
/// assert_eq!(display_value(&record, "missing", None), "-");
/// ```
#[must_use]
pub fn display_value(
    record: &Map<String, Value>,
    key: &str,
    middleware: Option<&dyn Fn(&Value) -> String>,
) -> String {
    match record.get(key) {
        None | Some(Value::Null) => EMPTY_TEXT.to_string(),
        Some(Value::String(s)) if s.is_empty() => EMPTY_TEXT.to_string(),
        Some(value) => middleware.map_or_else(|| plain_text(value), |transform| transform(value)),
    }
}

/// Text of one table cell.
///
/// `index` is the row position, handed to a custom renderer.
#[must_use]
pub fn format_cell(record: &Map<String, Value>, column: &Column, index: usize) -> String {
    let text = column
        .data_index
        .as_deref()
        .and_then(|key| record.get(key))
        .unwrap_or(&NULL);

    if let Some(render) = &column.custom_render {
        return render.render(&CellContext {
            record,
            text,
            index,
        });
    }

    let Some(key) = column.data_index.as_deref() else {
        return EMPTY_TEXT.to_string();
    };

    match column.value_type.as_deref() {
        Some("date") => {
            display_value(record, key, Some(&|v: &Value| format_timestamp(v, DATE_FORMAT)))
        }
        Some("dateTime") => {
            display_value(record, key, Some(&|v: &Value| format_timestamp(v, DATE_TIME_FORMAT)))
        }
        _ => display_value(record, key, None),
    }
}

/// Formats epoch milliseconds or an RFC 3339 / ISO date string.
///
/// Anything else is shown as is.
fn format_timestamp(value: &Value, format: &str) -> String {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::String(s) => parse_date_string(s),
        _ => None,
    };
    parsed.map_or_else(|| plain_text(value), |at| at.format(format).to_string())
}

fn parse_date_string(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT) {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnBuilder;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_display_value_dash_for_empty() {
        let r = record(json!({ "a": "", "b": null, "c": 0, "d": false }));
        assert_eq!(display_value(&r, "a", None), "-");
        assert_eq!(display_value(&r, "b", None), "-");
        assert_eq!(display_value(&r, "c", None), "0");
        assert_eq!(display_value(&r, "d", None), "false");
        assert_eq!(display_value(&r, "zzz", None), "-");
    }

    #[test]
    fn test_display_value_structured() {
        let r = record(json!({ "tags": ["a", "b"] }));
        assert_eq!(display_value(&r, "tags", None), r#"["a","b"]"#);
    }

    #[test]
    fn test_format_cell_dates() {
        let r = record(json!({
            "created": 0,
            "updated": "2024-03-05T10:20:30+02:00",
            "due": "2024-12-01",
            "odd": "someday"
        }));

        let date = |key: &str| ColumnBuilder::new().data_index(key).value_type("date").build();
        let date_time =
            |key: &str| ColumnBuilder::new().data_index(key).value_type("dateTime").build();

        assert_eq!(format_cell(&r, &date("created"), 0), "1970-01-01");
        assert_eq!(format_cell(&r, &date_time("updated"), 0), "2024-03-05 08:20:30");
        assert_eq!(format_cell(&r, &date_time("due"), 0), "2024-12-01 00:00:00");
        assert_eq!(format_cell(&r, &date("odd"), 0), "someday");
        assert_eq!(format_cell(&r, &date("missing"), 0), "-");
    }

    #[test]
    fn test_format_cell_custom_render_sees_missing_values() {
        let column = ColumnBuilder::new()
            .data_index("name")
            .custom_render(|ctx| format!("#{} {}", ctx.index, ctx.text))
            .build();
        assert_eq!(format_cell(&record(json!({})), &column, 2), "#2 null");
    }

    #[test]
    fn test_format_cell_without_data_index() {
        let column = ColumnBuilder::new().title("Actions").value_type("option").build();
        assert_eq!(format_cell(&record(json!({ "a": 1 })), &column, 0), "-");
    }
}

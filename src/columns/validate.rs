//! Structural validation of raw column configuration.
//!
//! Validation works on untyped JSON because its whole point is to describe what
//! is wrong with configuration that may not decode into [`Column`](crate::Column)
//! at all. Problems are reported as messages, never raised: the container keeps
//! rendering whatever it can interpret.

use crate::domain::{FieldKind, ProTableError};
use serde::Serialize;
use serde_json::{Map, Value};

/// Error code used when validation failures are surfaced as a [`ProTableError`].
pub const INVALID_COLUMNS_CODE: &str = "INVALID_COLUMNS";

/// Outcome of [`validate_columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnValidation {
    /// `true` iff `errors` is empty.
    pub valid: bool,

    /// One message per detected problem, in column order.
    pub errors: Vec<String>,
}

impl Default for ColumnValidation {
    fn default() -> Self {
        Self::from_errors(Vec::new())
    }
}

impl ColumnValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Converts a failed validation into the error shape used for the UI.
    ///
    /// Returns `None` when the configuration is valid.
    #[must_use]
    pub fn to_error(&self) -> Option<ProTableError> {
        if self.valid {
            return None;
        }

        let mut details = Map::new();
        details.insert(
            "errors".to_string(),
            Value::Array(self.errors.iter().cloned().map(Value::String).collect()),
        );

        Some(
            ProTableError::new(format!("invalid column configuration: {}", self.errors.join("; ")))
                .with_code(INVALID_COLUMNS_CODE)
                .with_details(details),
        )
    }
}

/// Checks that `columns` is an array of well-formed column descriptors.
///
/// A non-array input yields exactly one error and no per-column checks. For an
/// array, every element is checked and all problems are collected; an element
/// that is not an object gets a single error and no further checks.
///
/// # Checks Per Column
///
/// - `title` or `dataIndex` present
/// - `dataIndex`, when present, is a string
/// - `name`, when present, is a string
/// - `order`, when the key exists, is a number
/// - `component`, when present, is a built-in field kind or a component object
///
/// "Present" means set to something other than `null`, `false`, `0` or `""`.
///
/// # Example
///
/// ```rust
/// use protable::columns::validate_columns;
/// use serde_json::json;
///
/// let report = validate_columns(&json!([{ "hideInSearch": true }]));
/// assert!(!report.valid);
/// assert_eq!(report.errors, vec!["column 1: must provide title or dataIndex"]);
/// ```
#[must_use]
pub fn validate_columns(columns: &Value) -> ColumnValidation {
    let _span = tracing::debug_span!("validate_columns").entered();

    let Some(items) = columns.as_array() else {
        tracing::debug!("column configuration is not an array");
        return ColumnValidation::from_errors(vec!["columns must be an array".to_string()]);
    };

    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        validate_column(index + 1, item, &mut errors);
    }

    tracing::debug!(
        column_count = items.len(),
        error_count = errors.len(),
        "columns validated"
    );
    ColumnValidation::from_errors(errors)
}

fn validate_column(position: usize, item: &Value, errors: &mut Vec<String>) {
    let Some(column) = item.as_object() else {
        errors.push(format!("column {position}: must be an object"));
        return;
    };

    let present = |key: &str| column.get(key).filter(|value| is_truthy(value));

    if present("title").is_none() && present("dataIndex").is_none() {
        errors.push(format!("column {position}: must provide title or dataIndex"));
    }

    if present("dataIndex").is_some_and(|value| !value.is_string()) {
        errors.push(format!("column {position}: dataIndex must be a string"));
    }

    if present("name").is_some_and(|value| !value.is_string()) {
        errors.push(format!("column {position}: name must be a string"));
    }

    if column.get("order").is_some_and(|value| !value.is_number()) {
        errors.push(format!("column {position}: order must be a number"));
    }

    if present("component").is_some_and(|value| !is_component_reference(value)) {
        errors.push(format!(
            "column {position}: component must be a built-in field kind or a component object"
        ));
    }
}

fn is_component_reference(value: &Value) -> bool {
    match value {
        Value::String(identifier) => FieldKind::parse(identifier).is_some(),
        Value::Object(_) => true,
        _ => false,
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

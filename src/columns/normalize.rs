//! Derived defaults for column descriptors.

use crate::domain::column::non_empty;
use crate::domain::Column;
use crate::Locale;
use serde_json::{Map, Value};

/// Fills in the derivable fields of every descriptor.
///
/// Returns new descriptors; the input is not modified. Normalizing an already
/// normalized list returns an equal list.
///
/// # Derivations
///
/// 1. `name` ← `dataIndex` when `name` is absent or empty
/// 2. `label` ← `title` when `label` is absent or empty
/// 3. `hideInTable` ← `true` when legacy `visible` is `false` and `hideInTable`
///    is unset (an explicit `hideInTable` always wins)
/// 4. `fieldProps` ← `{ placeholder, allowClear: true }` when a `component` is
///    set without `fieldProps`; the placeholder text comes from `locale`
///
/// # Example
///
/// ```rust
/// use protable::{columns::normalize_columns, Column, Locale};
///
/// let columns = vec![Column {
///     title: Some("ID".to_string()),
///     data_index: Some("id".to_string()),
///     visible: Some(false),
///     ..Column::default()
/// }];
///
/// let normalized = normalize_columns(&columns, Locale::default());
/// assert_eq!(normalized[0].name.as_deref(), Some("id"));
/// assert_eq!(normalized[0].label.as_deref(), Some("ID"));
/// assert_eq!(normalized[0].hide_in_table, Some(true));
/// ```
#[must_use]
pub fn normalize_columns(columns: &[Column], locale: Locale) -> Vec<Column> {
    let _span = tracing::debug_span!("normalize_columns", column_count = columns.len()).entered();

    columns
        .iter()
        .map(|column| normalize_column(column, locale))
        .collect()
}

/// Normalizes a single descriptor. See [`normalize_columns`].
#[must_use]
pub fn normalize_column(column: &Column, locale: Locale) -> Column {
    let mut normalized = column.clone();

    if non_empty(normalized.name.as_deref()).is_none() {
        if let Some(data_index) = non_empty(normalized.data_index.as_deref()) {
            normalized.name = Some(data_index.to_string());
        }
    }

    if non_empty(normalized.label.as_deref()).is_none() {
        if let Some(title) = non_empty(normalized.title.as_deref()) {
            normalized.label = Some(title.to_string());
        }
    }

    if normalized.visible == Some(false) && normalized.hide_in_table.is_none() {
        normalized.hide_in_table = Some(true);
    }

    if normalized.component.is_some() && normalized.field_props.is_none() {
        normalized.field_props = Some(default_field_props(locale));
    }

    normalized
}

fn default_field_props(locale: Locale) -> Map<String, Value> {
    let mut props = Map::new();
    props.insert(
        "placeholder".to_string(),
        Value::String(locale.input_placeholder().to_string()),
    );
    props.insert("allowClear".to_string(), Value::Bool(true));
    props
}

//! Visible column sets for the table and the search form.

use crate::domain::Column;
use std::cmp::Ordering;

/// Columns shown in the table, in configuration order.
///
/// Excludes descriptors with `hideInTable: true`.
#[must_use]
pub fn table_columns(columns: &[Column]) -> Vec<&Column> {
    columns
        .iter()
        .filter(|column| !column.is_hidden_in_table())
        .collect()
}

/// Fields shown in the search form, highest `order` first.
///
/// Excludes descriptors with `hideInSearch: true` and operations columns
/// (`valueType: "option"`). Descriptors without `order` come after every
/// descriptor that has one; ties keep configuration order.
#[must_use]
pub fn search_fields(columns: &[Column]) -> Vec<&Column> {
    let mut fields: Vec<&Column> = columns
        .iter()
        .filter(|column| !column.is_hidden_in_search() && !column.is_option_column())
        .collect();
    fields.sort_by(|a, b| compare_order(a.order, b.order));
    fields
}

fn compare_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns(value: serde_json::Value) -> Vec<Column> {
        serde_json::from_value(value).unwrap()
    }

    fn titles(columns: &[&Column]) -> Vec<String> {
        columns.iter().filter_map(|c| c.title.clone()).collect()
    }

    #[test]
    fn test_table_columns_skip_hidden() {
        let cols = columns(json!([
            { "title": "ID", "dataIndex": "id" },
            { "title": "Name", "dataIndex": "name", "hideInTable": true },
            { "title": "Age", "dataIndex": "age" }
        ]));
        assert_eq!(titles(&table_columns(&cols)), vec!["ID", "Age"]);
    }

    #[test]
    fn test_search_fields_skip_hidden_and_option_columns() {
        let cols = columns(json!([
            { "title": "ID", "dataIndex": "id" },
            { "title": "Name", "dataIndex": "name", "hideInSearch": true },
            { "title": "Actions", "valueType": "option" },
            { "title": "Age", "dataIndex": "age" }
        ]));
        assert_eq!(titles(&search_fields(&cols)), vec!["ID", "Age"]);
    }

    #[test]
    fn test_search_fields_order_descending_absent_last_stable() {
        let cols = columns(json!([
            { "title": "A" },
            { "title": "B", "order": 1 },
            { "title": "C", "order": -5 },
            { "title": "D" },
            { "title": "E", "order": 10 },
            { "title": "F", "order": 1 }
        ]));
        assert_eq!(titles(&search_fields(&cols)), vec!["E", "B", "F", "C", "A", "D"]);
    }
}

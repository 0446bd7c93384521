//! Column descriptor domain model.
//!
//! A [`Column`] describes one logical column of the table and, at the same time,
//! the matching field of the search form. Table attributes (`title`,
//! `dataIndex`, `hideInTable`, ...) and search attributes (`name`, `label`,
//! `hideInSearch`, `order`, `component`, ...) live side by side in one record so
//! callers configure both surfaces in one place.
//!
//! Descriptors round-trip through JSON with camelCase keys. Keys this model does
//! not know about are kept in [`Column::extra`], so normalization never drops
//! caller-supplied data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Built-in search form input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Input,
    InputNumber,
    Select,
    TreeSelect,
    Cascader,
    DatePicker,
    RangePicker,
    TimePicker,
    Checkbox,
    Radio,
    Switch,
    AutoComplete,
}

impl FieldKind {
    /// All built-in kinds.
    pub const ALL: [Self; 12] = [
        Self::Input,
        Self::InputNumber,
        Self::Select,
        Self::TreeSelect,
        Self::Cascader,
        Self::DatePicker,
        Self::RangePicker,
        Self::TimePicker,
        Self::Checkbox,
        Self::Radio,
        Self::Switch,
        Self::AutoComplete,
    ];

    /// Returns the kebab-case identifier used in JSON configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::InputNumber => "input-number",
            Self::Select => "select",
            Self::TreeSelect => "tree-select",
            Self::Cascader => "cascader",
            Self::DatePicker => "date-picker",
            Self::RangePicker => "range-picker",
            Self::TimePicker => "time-picker",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Switch => "switch",
            Self::AutoComplete => "auto-complete",
        }
    }

    /// Parses a kebab-case identifier.
    #[must_use]
    pub fn parse(identifier: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == identifier)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the input used for a search field.
///
/// Either one of the built-in kinds (`"select"`) or an opaque handle object that
/// an external renderer knows how to interpret (`{"renderer": "StatusPicker"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldComponent {
    Builtin(FieldKind),
    External(Map<String, Value>),
}

impl From<FieldKind> for FieldComponent {
    fn from(kind: FieldKind) -> Self {
        Self::Builtin(kind)
    }
}

/// Column width: pixels or any CSS length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnWidth {
    Pixels(u32),
    /// Fractional or negative numbers, passed through to the renderer.
    Number(f64),
    Css(String),
}

impl From<u32> for ColumnWidth {
    fn from(pixels: u32) -> Self {
        Self::Pixels(pixels)
    }
}

impl From<f64> for ColumnWidth {
    fn from(width: f64) -> Self {
        Self::Number(width)
    }
}

impl From<&str> for ColumnWidth {
    fn from(css: &str) -> Self {
        Self::Css(css.to_string())
    }
}

impl From<String> for ColumnWidth {
    fn from(css: String) -> Self {
        Self::Css(css)
    }
}

/// Sorting switch or sorter options such as `{"multiple": 1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sorter {
    Enabled(bool),
    Options(Map<String, Value>),
}

/// Horizontal cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Side a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fixed {
    Left,
    Right,
}

/// One validation rule attached to a search field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldRule {
    /// Rule that marks a field as required with the given message.
    #[must_use]
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: Some(true),
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Arguments passed to a [`CellRenderer`].
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    /// The whole row.
    pub record: &'a Map<String, Value>,
    /// The raw value at the column's `dataIndex` (`Null` when absent).
    pub text: &'a Value,
    /// Zero-based row index within the current page.
    pub index: usize,
}

/// Custom cell render hook.
///
/// Not serializable: it only exists on descriptors built in code.
#[derive(Clone)]
pub struct CellRenderer(Arc<dyn Fn(&CellContext<'_>) -> String + Send + Sync>);

impl CellRenderer {
    pub fn new(render: impl Fn(&CellContext<'_>) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    #[must_use]
    pub fn render(&self, context: &CellContext<'_>) -> String {
        (self.0)(context)
    }
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellRenderer(..)")
    }
}

impl PartialEq for CellRenderer {
    fn eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.0).cast::<()>() == Arc::as_ptr(&other.0).cast::<()>()
    }
}

/// Table column and search field descriptor.
///
/// # Example
///
/// ```rust
/// use protable::Column;
/// use serde_json::json;
///
/// let column: Column = serde_json::from_value(json!({
///     "title": "ID",
///     "dataIndex": "id",
///     "hideInSearch": true,
///     "tooltip": "primary key"
/// }))?;
///
/// assert_eq!(column.data_index.as_deref(), Some("id"));
/// assert!(column.is_hidden_in_search());
/// assert_eq!(column.extra["tooltip"], json!("primary key"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column header text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Key of the row field displayed in this column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_index: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_in_table: Option<bool>,

    /// Legacy visibility flag, translated to `hide_in_table` by normalization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed: Option<Fixed>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorter: Option<Sorter>,

    #[serde(skip)]
    pub custom_render: Option<CellRenderer>,

    /// Search form field name. Defaults to `data_index`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Search form label. Defaults to `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_in_search: Option<bool>,

    /// Value type hint. `"option"` marks an operations column, never searchable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Search form ordering weight. Higher comes first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<FieldComponent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_props: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_item_props: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_options: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<FieldRule>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Fields this model does not know about, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Column {
    #[must_use]
    pub fn is_hidden_in_table(&self) -> bool {
        self.hide_in_table == Some(true)
    }

    #[must_use]
    pub fn is_hidden_in_search(&self) -> bool {
        self.hide_in_search == Some(true)
    }

    /// Returns `true` for operations columns (`valueType: "option"`).
    #[must_use]
    pub fn is_option_column(&self) -> bool {
        self.value_type.as_deref() == Some("option")
    }

    /// Name under which this column's value is submitted by the search form.
    ///
    /// Falls back to `data_index` for descriptors that were not normalized.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref()).or_else(|| non_empty(self.data_index.as_deref()))
    }

    /// Returns `true` if the search field must be filled before searching.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required == Some(true)
            || self
                .rules
                .iter()
                .flatten()
                .any(|rule| rule.required == Some(true))
    }

    /// Message shown when a required search field is empty.
    #[must_use]
    pub fn required_message(&self) -> Option<&str> {
        self.rules
            .iter()
            .flatten()
            .filter(|rule| rule.required == Some(true))
            .find_map(|rule| rule.message.as_deref())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case_and_extra() {
        let column: Column = serde_json::from_value(json!({
            "title": "Status",
            "dataIndex": "status",
            "hideInTable": false,
            "order": 3,
            "component": "select",
            "width": "20%",
            "align": "center",
            "sorter": true,
            "ellipsis": true
        }))
        .unwrap();

        assert_eq!(column.order, Some(3.0));
        assert_eq!(column.component, Some(FieldComponent::Builtin(FieldKind::Select)));
        assert_eq!(column.width, Some(ColumnWidth::Css("20%".to_string())));
        assert_eq!(column.align, Some(Align::Center));
        assert_eq!(column.sorter, Some(Sorter::Enabled(true)));
        assert_eq!(column.extra.get("ellipsis"), Some(&json!(true)));
    }

    #[test]
    fn test_fractional_width_and_sorter_options() {
        let column: Column = serde_json::from_value(json!({
            "dataIndex": "score",
            "width": 120.5,
            "sorter": { "multiple": 1 }
        }))
        .unwrap();

        assert_eq!(column.width, Some(ColumnWidth::Number(120.5)));
        match column.sorter {
            Some(Sorter::Options(options)) => assert_eq!(options["multiple"], json!(1)),
            other => panic!("unexpected sorter: {other:?}"),
        }
    }

    #[test]
    fn test_external_component_handle() {
        let column: Column = serde_json::from_value(json!({
            "dataIndex": "owner",
            "component": { "renderer": "UserPicker" }
        }))
        .unwrap();

        match column.component {
            Some(FieldComponent::External(handle)) => {
                assert_eq!(handle["renderer"], json!("UserPicker"));
            }
            other => panic!("unexpected component: {other:?}"),
        }
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let column = Column {
            title: Some("ID".to_string()),
            width: Some(ColumnWidth::Pixels(100)),
            ..Column::default()
        };
        assert_eq!(
            serde_json::to_value(&column).unwrap(),
            json!({ "title": "ID", "width": 100 })
        );
    }

    #[test]
    fn test_required_from_rules() {
        let column = Column {
            rules: Some(vec![FieldRule::required("Email is required")]),
            ..Column::default()
        };
        assert!(column.is_required());
        assert_eq!(column.required_message(), Some("Email is required"));
    }

    #[test]
    fn test_field_name_falls_back_to_data_index() {
        let column = Column {
            data_index: Some("id".to_string()),
            name: Some(String::new()),
            ..Column::default()
        };
        assert_eq!(column.field_name(), Some("id"));
    }

    #[test]
    fn test_field_kind_parse() {
        assert_eq!(FieldKind::parse("date-picker"), Some(FieldKind::DatePicker));
        assert_eq!(FieldKind::parse("DatePicker"), None);
    }
}

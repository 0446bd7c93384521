//! View model types representing renderable table state.
//!
//! View models are created via
//! [`TableState::compute_viewmodel`](crate::app::TableState::compute_viewmodel)
//! and consumed by whatever renders the table. They contain no business logic,
//! only display-ready data: cell text is already formatted, hidden columns are
//! already dropped and search fields are already ordered.
//!
//! # Example
//!
//! ```rust
//! use protable::ui::viewmodel::{HeaderCell, TableViewModel};
//!
//! let vm = TableViewModel {
//!     headers: vec![HeaderCell { title: "Name".to_string(), width: None, align: None }],
//!     rows: vec![vec!["Ann".to_string()]],
//!     search: None,
//!     pagination: None,
//!     loading: false,
//!     error: None,
//!     is_empty: false,
//! };
//! assert_eq!(vm.rows[0][0], "Ann");
//! ```

use crate::domain::{Align, ColumnWidth, FieldComponent};
use serde::Serialize;
use serde_json::{Map, Value};

/// Complete view model for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableViewModel {
    /// One header per visible table column.
    pub headers: Vec<HeaderCell>,

    /// Formatted cell text, one inner vector per row, aligned with `headers`.
    pub rows: Vec<Vec<String>>,

    /// Search form, absent when `showSearch` is off.
    pub search: Option<SearchForm>,

    /// Pagination footer, absent when `hidePagination` is set.
    pub pagination: Option<PaginationInfo>,

    pub loading: bool,

    /// Message of the last failed request.
    pub error: Option<String>,

    /// No rows to show and nothing loading.
    pub is_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub title: String,
    pub width: Option<ColumnWidth>,
    pub align: Option<Align>,
}

/// Search form display information.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchForm {
    /// Fields in display order (highest `order` first).
    pub fields: Vec<SearchField>,
    pub show_search_button: bool,
}

/// One search form field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchField {
    /// Submitted field name. May contain the field delimiter.
    pub name: String,
    pub label: String,
    pub component: Option<FieldComponent>,
    pub field_props: Option<Map<String, Value>>,

    /// Value of the last submitted search or the default value.
    pub value: Option<Value>,

    pub required: bool,

    /// Required-field error from the last rejected search.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
    pub page_count: u64,
}

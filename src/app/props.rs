//! Per-table options supplied by the embedding UI.
//!
//! Mirrors the container's public props. All fields default so a table can be
//! described by an empty object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options of one table instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableProps {
    /// Do not request data on mount; wait for an explicit reload or search.
    pub manual_request: bool,

    /// Render the search form.
    pub show_search: bool,

    pub table_options: TableOptions,

    pub page_options: PageOptions,

    pub search_options: SearchOptions,
}

impl Default for TableProps {
    fn default() -> Self {
        Self {
            manual_request: false,
            show_search: true,
            table_options: TableOptions::default(),
            page_options: PageOptions::default(),
            search_options: SearchOptions::default(),
        }
    }
}

/// Table display options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    pub hide_pagination: bool,

    /// Options passed through to the table renderer untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Initial pagination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageOptions {
    /// Initial page, 1-based. Defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u32>,

    /// Page size. Defaults to [`Config::page_size`](crate::Config::page_size).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Search form options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    pub hide_search_button: bool,

    /// Options passed through to the form renderer untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

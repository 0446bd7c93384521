//! Table state and view model computation.
//!
//! [`TableState`] is the single source of truth for one table instance: the
//! prepared columns, paging, the flat search values, the rows of the last
//! successful request, and the bookkeeping for in-flight requests, the debounced
//! search and the reload throttle. The event handler mutates it; view models are
//! computed from it on demand.
//!
//! # Example
//!
//! ```rust
//! use protable::app::{TableProps, TableState};
//! use protable::columns::prepare_columns;
//! use protable::Config;
//! use serde_json::json;
//!
//! let config = Config::default();
//! let columns = prepare_columns(
//!     &json!([{ "title": "Status", "dataIndex": "status", "defaultValue": "open" }]),
//!     config.locale,
//! );
//! let state = TableState::new(columns, TableProps::default(), &config);
//!
//! assert_eq!(state.page.current, 1);
//! assert_eq!(state.search_values["status"], json!("open"));
//! ```

use super::actions::Action;
use super::props::TableProps;
use super::request::build_request_params;
use crate::columns::{search_fields, table_columns, ColumnSet, ColumnValidation};
use crate::domain::{Column, ProTableError};
use crate::form::{is_blank, FormValues};
use crate::timing::{DebounceTimer, ThrottleWindow};
use crate::ui::format::format_cell;
use crate::ui::viewmodel::{HeaderCell, PaginationInfo, SearchField, SearchForm, TableViewModel};
use crate::{Config, Locale};
use serde_json::{Map, Value};
use std::time::Duration;

/// A required search field left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub name: String,
    pub message: String,
}

/// Current page, page size and total row count reported by the last request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page number.
    pub current: u32,
    pub page_size: u32,
    pub total: u64,
}

impl PageState {
    /// Number of pages needed for `total` rows. Zero when there are no rows.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        let size = u64::from(self.page_size.max(1));
        self.total / size + u64::from(self.total % size != 0)
    }
}

/// State of one table instance.
#[derive(Debug, Clone)]
pub struct TableState {
    /// Normalized column descriptors in configuration order.
    pub columns: Vec<Column>,

    /// Validation report of the raw column configuration.
    pub validation: ColumnValidation,

    pub props: TableProps,

    pub locale: Locale,

    pub page: PageState,

    /// Flat values of the last submitted search.
    ///
    /// Keys may contain the field delimiter; they are expanded only when
    /// request parameters are built.
    pub search_values: FormValues,

    /// Values restored by a reset, taken from column `defaultValue`s.
    pub default_values: FormValues,

    /// Rows returned by the last successful request.
    pub rows: Vec<Map<String, Value>>,

    /// A request is in flight.
    pub loading: bool,

    /// Error of the last settled request, cleared by the next request.
    pub last_error: Option<ProTableError>,

    /// Required-field errors from the last rejected search.
    pub form_errors: Vec<FieldError>,

    request_seq: u64,
    pending_seq: Option<u64>,
    search_debounce: DebounceTimer<FormValues>,
    reload_throttle: ThrottleWindow,
}

impl TableState {
    /// Creates the state for prepared columns and props.
    ///
    /// Search values start from the columns' default values. Paging starts at
    /// `pageOptions.current` (or 1) with `pageOptions.pageSize` (or
    /// [`Config::page_size`]). Zero values are raised to 1.
    #[must_use]
    pub fn new(columns: ColumnSet, props: TableProps, config: &Config) -> Self {
        let default_values: FormValues = columns
            .columns
            .iter()
            .filter_map(|column| {
                let name = column.field_name()?;
                let value = column.default_value.as_ref()?;
                Some((name.to_string(), value.clone()))
            })
            .collect();

        let page = PageState {
            current: props.page_options.current.unwrap_or(1).max(1),
            page_size: props.page_options.page_size.unwrap_or(config.page_size).max(1),
            total: 0,
        };

        tracing::debug!(
            columns = columns.columns.len(),
            defaults = default_values.len(),
            page_size = page.page_size,
            "table state created"
        );

        Self {
            columns: columns.columns,
            validation: columns.validation,
            props,
            locale: config.locale,
            page,
            search_values: default_values.clone(),
            default_values,
            rows: Vec::new(),
            loading: false,
            last_error: None,
            form_errors: Vec::new(),
            request_seq: 0,
            pending_seq: None,
            search_debounce: DebounceTimer::new(Duration::from_millis(config.search_debounce_ms)),
            reload_throttle: ThrottleWindow::new(Duration::from_millis(config.reload_throttle_ms)),
        }
    }

    #[must_use]
    pub fn table_columns(&self) -> Vec<&Column> {
        table_columns(&self.columns)
    }

    #[must_use]
    pub fn search_fields(&self) -> Vec<&Column> {
        search_fields(&self.columns)
    }

    /// Parameters for a request of the current page with the current search.
    #[must_use]
    pub fn request_params(&self) -> Map<String, Value> {
        build_request_params(&self.search_values, self.page.current, self.page.page_size)
    }

    /// Starts a new request, superseding any request still in flight.
    pub fn begin_request(&mut self) -> Action {
        self.request_seq += 1;
        self.pending_seq = Some(self.request_seq);
        self.loading = true;
        self.last_error = None;

        let params = self.request_params();
        tracing::debug!(seq = self.request_seq, page = self.page.current, "request issued");
        Action::Request {
            seq: self.request_seq,
            params,
        }
    }

    /// Returns `true` if `seq` identifies the request currently awaited.
    #[must_use]
    pub fn is_awaiting(&self, seq: u64) -> bool {
        self.pending_seq == Some(seq)
    }

    /// Marks the awaited request as settled.
    pub(crate) fn settle(&mut self) {
        self.pending_seq = None;
        self.loading = false;
    }

    /// Checks required search fields against `values`.
    ///
    /// A visible search field is required when it sets `required: true` or
    /// carries a rule with `required: true`. Missing and blank values fail.
    #[must_use]
    pub fn check_required(&self, values: &FormValues) -> Vec<FieldError> {
        self.search_fields()
            .into_iter()
            .filter(|column| column.is_required())
            .filter_map(|column| {
                let name = column.field_name()?;
                if values.get(name).is_some_and(|value| !is_blank(value)) {
                    return None;
                }
                let message = column.required_message().map_or_else(
                    || self.locale.required_message(field_label(column)),
                    String::from,
                );
                Some(FieldError {
                    name: name.to_string(),
                    message,
                })
            })
            .collect()
    }

    pub(crate) fn search_debounce_mut(&mut self) -> &mut DebounceTimer<FormValues> {
        &mut self.search_debounce
    }

    pub(crate) fn reload_throttle_mut(&mut self) -> &mut ThrottleWindow {
        &mut self.reload_throttle
    }

    /// Returns `true` while a debounced search is waiting to fire.
    #[must_use]
    pub const fn has_pending_search(&self) -> bool {
        self.search_debounce.is_pending()
    }

    /// Computes the renderable view of the current state.
    ///
    /// Headers and cells follow the visible table columns; search fields follow
    /// the ordered search columns and carry the current value and any
    /// required-field error. Pagination is omitted when `hidePagination` is set,
    /// the search form when `showSearch` is off.
    #[must_use]
    pub fn compute_viewmodel(&self) -> TableViewModel {
        let columns = self.table_columns();

        let headers = columns
            .iter()
            .map(|column| HeaderCell {
                title: column
                    .title
                    .clone()
                    .or_else(|| column.data_index.clone())
                    .unwrap_or_default(),
                width: column.width.clone(),
                align: column.align,
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, record)| {
                columns
                    .iter()
                    .map(|column| format_cell(record, column, index))
                    .collect()
            })
            .collect();

        let search = self.props.show_search.then(|| SearchForm {
            fields: self
                .search_fields()
                .into_iter()
                .map(|column| self.search_field(column))
                .collect(),
            show_search_button: !self.props.search_options.hide_search_button,
        });

        let pagination = (!self.props.table_options.hide_pagination).then(|| PaginationInfo {
            current: self.page.current,
            page_size: self.page.page_size,
            total: self.page.total,
            page_count: self.page.page_count(),
        });

        TableViewModel {
            headers,
            rows,
            search,
            pagination,
            loading: self.loading,
            error: self.last_error.as_ref().map(|e| e.message.clone()),
            is_empty: self.rows.is_empty() && !self.loading,
        }
    }

    fn search_field(&self, column: &Column) -> SearchField {
        let name = column.field_name().unwrap_or_default().to_string();
        SearchField {
            label: field_label(column).to_string(),
            component: column.component.clone(),
            field_props: column.field_props.clone(),
            value: self.search_values.get(&name).cloned(),
            required: column.is_required(),
            error: self
                .form_errors
                .iter()
                .find(|error| error.name == name)
                .map(|error| error.message.clone()),
            name,
        }
    }
}

fn field_label(column: &Column) -> &str {
    column
        .label
        .as_deref()
        .or(column.title.as_deref())
        .or_else(|| column.field_name())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::prepare_columns;
    use serde_json::json;

    fn state(columns: Value, props: Value) -> TableState {
        let config = Config {
            locale: Locale::EnUs,
            ..Config::default()
        };
        TableState::new(
            prepare_columns(&columns, config.locale),
            serde_json::from_value(props).unwrap(),
            &config,
        )
    }

    #[test]
    fn test_paging_from_props_and_config() {
        let s = state(json!([]), json!({ "pageOptions": { "current": 3 } }));
        assert_eq!(s.page, PageState { current: 3, page_size: 10, total: 0 });

        let s = state(json!([]), json!({ "pageOptions": { "current": 0, "pageSize": 0 } }));
        assert_eq!(s.page.current, 1);
        assert_eq!(s.page.page_size, 1);
    }

    #[test]
    fn test_page_count() {
        let page = |total| PageState { current: 1, page_size: 10, total };
        assert_eq!(page(0).page_count(), 0);
        assert_eq!(page(10).page_count(), 1);
        assert_eq!(page(11).page_count(), 2);
    }

    #[test]
    fn test_page_count_near_max_total() {
        let page = PageState { current: 1, page_size: 10, total: u64::MAX };
        assert_eq!(page.page_count(), u64::MAX / 10 + 1);

        let single = PageState { current: 1, page_size: 1, total: u64::MAX };
        assert_eq!(single.page_count(), u64::MAX);
    }

    #[test]
    fn test_begin_request_supersedes_previous() {
        let mut s = state(json!([]), json!({}));
        let first = s.begin_request();
        let second = s.begin_request();

        assert!(matches!(first, Action::Request { seq: 1, .. }));
        assert!(matches!(second, Action::Request { seq: 2, .. }));
        assert!(!s.is_awaiting(1));
        assert!(s.is_awaiting(2));
        assert!(s.loading);
    }

    #[test]
    fn test_request_params_include_defaults_and_paging() {
        let s = state(
            json!([{ "title": "Owner", "dataIndex": "owner,name", "defaultValue": "ann" }]),
            json!({}),
        );
        assert_eq!(
            Value::Object(s.request_params()),
            json!({ "owner": { "name": "ann" }, "current": 1, "pageSize": 10 })
        );
    }

    #[test]
    fn test_check_required() {
        let s = state(
            json!([
                { "title": "Name", "dataIndex": "name", "required": true },
                {
                    "title": "Email",
                    "dataIndex": "email",
                    "rules": [{ "required": true, "message": "Email is required" }]
                },
                {
                    "title": "Hidden",
                    "dataIndex": "hidden",
                    "required": true,
                    "hideInSearch": true
                },
                { "title": "Age", "dataIndex": "age" }
            ]),
            json!({}),
        );

        let errors = s.check_required(json!({ "name": "" }).as_object().unwrap());
        assert_eq!(
            errors,
            vec![
                FieldError { name: "name".into(), message: "Please input Name".into() },
                FieldError { name: "email".into(), message: "Email is required".into() },
            ]
        );

        let ok = s.check_required(json!({ "name": "a", "email": "b" }).as_object().unwrap());
        assert!(ok.is_empty());
    }

    #[test]
    fn test_viewmodel() {
        let mut s = state(
            json!([
                { "title": "ID", "dataIndex": "id", "hideInSearch": true },
                { "title": "Name", "dataIndex": "name", "width": 120 },
                { "title": "Secret", "dataIndex": "secret", "hideInTable": true },
                { "title": "Actions", "valueType": "option" }
            ]),
            json!({ "searchOptions": { "hideSearchButton": true } }),
        );
        s.rows = vec![json!({ "id": 1, "name": "Ann" }).as_object().cloned().unwrap()];
        s.page.total = 21;

        let vm = s.compute_viewmodel();
        let titles: Vec<_> = vm.headers.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["ID", "Name", "Actions"]);
        assert_eq!(vm.rows, vec![vec!["1".to_string(), "Ann".into(), "-".into()]]);

        let search = vm.search.unwrap();
        let names: Vec<_> = search.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "secret"]);
        assert!(!search.show_search_button);

        assert_eq!(vm.pagination.map(|p| p.page_count), Some(3));
        assert!(!vm.is_empty);
    }

    #[test]
    fn test_viewmodel_hides_search_and_pagination() {
        let s = state(
            json!([]),
            json!({ "showSearch": false, "tableOptions": { "hidePagination": true } }),
        );
        let vm = s.compute_viewmodel();
        assert!(vm.search.is_none());
        assert!(vm.pagination.is_none());
        assert!(vm.is_empty);
    }
}

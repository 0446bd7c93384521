//! ProTable: a headless core for search-enabled, paginated data tables.
//!
//! The crate does the data shaping behind a table with a search form on top:
//! - Converting flat form values with delimited keys into nested request parameters
//! - Validating and normalizing column descriptors supplied as loose JSON
//! - Wrapping failures of data requests and user callbacks into one error shape
//! - Debouncing search input and throttling reloads
//! - Driving the table through an event/action state machine and computing view models

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Embedding UI / runtime                             │  ← Renders, fetches
//! └─────────────────────────────────────────────────────┘
//!                        │ Events ↓   ↑ Actions, view models
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Request lifecycle                                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Columns       │   │ Form codec    │   │ Timing        │
//! │ (columns/)    │   │ (form/)       │   │ (timing/)     │
//! │ - Validate    │   │ - Unflatten   │   │ - Debounce    │
//! │ - Normalize   │   │ - Filter empty│   │ - Throttle    │
//! │ - Builder     │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & UI Layers                                 │
//! │  - Column model, errors, failure wrapping (domain/) │
//! │  - Cell formatting, view model types (ui/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber setup, error sinks            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Table state machine with event/action model
//! - [`columns`]: Column validation, normalization, layout and builder
//! - [`domain`]: Column model, error types and failure wrapping
//! - [`form`]: Form data codec
//! - [`timing`]: Debounce and throttle primitives
//! - [`ui`]: Cell formatting and view models
//! - [`observability`]: Tracing setup and error sinks
//!
//! # Configuration
//!
//! ```toml
//! locale = "en-US"
//! page_size = 20
//! search_debounce_ms = 300
//! reload_throttle_ms = 1000
//! trace_level = "debug"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use protable::app::TableProps;
//! use protable::{handle_event, initialize, Action, Config, Event, RequestResult};
//! use serde_json::json;
//!
//! let columns = json!([
//!     { "title": "Name", "dataIndex": "name" },
//!     { "title": "City", "dataIndex": "address,city" }
//! ]);
//! let mut state = initialize(&Config::default(), &columns, TableProps::default());
//!
//! let search = json!({ "address,city": "Oslo", "name": "" });
//! let (_, actions) = handle_event(
//!     &mut state,
//!     &Event::Search { values: search.as_object().cloned().unwrap_or_default() },
//! )?;
//!
//! let Action::Request { seq, params } = &actions[0] else { unreachable!() };
//! assert_eq!(
//!     serde_json::Value::Object(params.clone()),
//!     json!({ "address": { "city": "Oslo" }, "current": 1, "pageSize": 10 })
//! );
//!
//! let rows = vec![json!({ "name": "Ann" }).as_object().cloned().unwrap_or_default()];
//! handle_event(
//!     &mut state,
//!     &Event::RequestSettled { seq: *seq, outcome: Ok(RequestResult::ok(rows, 1)) },
//! )?;
//!
//! let vm = state.compute_viewmodel();
//! assert_eq!(vm.rows, vec![vec!["Ann".to_string(), "-".to_string()]]);
//! # Ok::<(), protable::TableError>(())
//! ```

pub mod app;
pub mod columns;
pub mod domain;
pub mod form;
pub mod timing;
pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, RequestResult, TableProps, TableState};
pub use columns::ColumnBuilder;
pub use domain::{handle_error, safe_execute, Column, ProTableError, Result, TableError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Language of built-in texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// Parses a locale tag. Case-insensitive; `_` is accepted in place of `-`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" => Some(Self::ZhCn),
            "en-us" | "en" => Some(Self::EnUs),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }

    /// Default placeholder of search inputs.
    #[must_use]
    pub const fn input_placeholder(self) -> &'static str {
        match self {
            Self::ZhCn => "请输入",
            Self::EnUs => "Please input",
        }
    }

    /// Message for an empty required search field labelled `label`.
    #[must_use]
    pub fn required_message(self, label: &str) -> String {
        match self {
            Self::ZhCn => format!("请输入{label}"),
            Self::EnUs => format!("Please input {label}"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Table configuration shared by every table instance.
///
/// # Example
///
/// ```toml
/// locale = "en-US"
/// page_size = 20
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language of placeholders and required-field messages. Default: `zh-CN`
    pub locale: Locale,

    /// Page size used when a table does not set `pageOptions.pageSize`. Default: 10
    pub page_size: u32,

    /// Quiet period before a changed search field triggers a search. Default: 300
    pub search_debounce_ms: u64,

    /// Minimum interval between two reloads. Default: 1000
    pub reload_throttle_ms: u64,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            page_size: 10,
            search_debounce_ms: 300,
            reload_throttle_ms: 1000,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map, such as host-provided options.
    ///
    /// # Parsing Rules
    ///
    /// - `locale`: locale tag (falls back to `zh-CN` if unknown)
    /// - `page_size`: String → `u32` (falls back to 10 on parse error or zero)
    /// - `search_debounce_ms`: String → `u64` (falls back to 300 on parse error)
    /// - `reload_throttle_ms`: String → `u64` (falls back to 1000 on parse error)
    /// - `trace_level`: String → `Option<String>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use protable::{Config, Locale};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("locale".to_string(), "en-US".to_string());
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("search_debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.locale, Locale::EnUs);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.search_debounce_ms, 300);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let locale = config
            .get("locale")
            .and_then(|tag| Locale::parse(tag))
            .unwrap_or(defaults.locale);

        let page_size = config
            .get("page_size")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(defaults.page_size);

        let search_debounce_ms = config
            .get("search_debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.search_debounce_ms);

        let reload_throttle_ms = config
            .get("reload_throttle_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.reload_throttle_ms);

        Self {
            locale,
            page_size,
            search_debounce_ms,
            reload_throttle_ms,
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Parses configuration from a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Toml`] if the document is not valid TOML or a key
    /// has the wrong type, and [`TableError::Config`] if `page_size` is zero.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.page_size == 0 {
            return Err(TableError::Config("page_size must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("load_config", path = %path.display()).entered();

        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(locale = %config.locale, page_size = config.page_size, "config loaded");
        Ok(config)
    }
}

/// Creates the state of one table from raw column configuration.
///
/// - Installs the tracing subscriber if `trace_level` is set
/// - Validates, decodes and normalizes `raw_columns` (problems are kept in
///   [`TableState::validation`] and reported on mount)
/// - Seeds search values from column default values
///
/// # Example
///
/// ```rust
/// use protable::app::TableProps;
/// use protable::{initialize, Config};
/// use serde_json::json;
///
/// let state = initialize(
///     &Config::default(),
///     &json!([{ "title": "ID", "dataIndex": "id" }, { "dataIndex": 7 }]),
///     TableProps::default(),
/// );
///
/// assert_eq!(state.columns.len(), 1);
/// assert!(!state.validation.valid);
/// ```
pub fn initialize(
    config: &Config,
    raw_columns: &serde_json::Value,
    props: TableProps,
) -> TableState {
    if config.trace_level.is_some() {
        observability::init_tracing(config);
    }

    tracing::debug!(locale = %config.locale, "initializing table");

    let prepared = columns::prepare_columns(raw_columns, config.locale);
    TableState::new(prepared, props, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("en_US"), Some(Locale::EnUs));
        assert_eq!(Locale::parse("ZH-cn"), Some(Locale::ZhCn));
        assert_eq!(Locale::parse("fr-FR"), None);
    }

    #[test]
    fn test_locale_serde_tags() {
        assert_eq!(serde_json::to_string(&Locale::EnUs).unwrap(), r#""en-US""#);
        let locale: Locale = serde_json::from_str(r#""zh-CN""#).unwrap();
        assert_eq!(locale, Locale::ZhCn);
    }

    #[test]
    fn test_from_map_defaults() {
        let config = Config::from_map(&BTreeMap::new());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_map_rejects_zero_page_size() {
        let map = BTreeMap::from([
            ("page_size".to_string(), "0".to_string()),
            ("locale".to_string(), "klingon".to_string()),
            ("trace_level".to_string(), "warn".to_string()),
        ]);
        let config = Config::from_map(&map);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.locale, Locale::ZhCn);
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_from_toml_str() {
        let config =
            Config::from_toml_str("locale = \"en-US\"\nreload_throttle_ms = 50\n").unwrap();
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.reload_throttle_ms, 50);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_from_toml_str_errors() {
        assert!(matches!(Config::from_toml_str("page_size = \"ten\""), Err(TableError::Toml(_))));
        assert!(matches!(Config::from_toml_str("page_size = 0"), Err(TableError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = 50").unwrap();
        writeln!(file, "trace_level = \"debug\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(TableError::Io(_))));
    }
}

//! Error types for the table core.
//!
//! Two kinds of errors live here:
//!
//! - [`TableError`] is the crate-level error returned by fallible library calls
//!   (configuration loading, column parsing). Use the [`Result`] alias.
//! - [`ProTableError`] is the tagged error value surfaced to the enclosing UI. It
//!   carries a human-readable message plus an optional code and structured
//!   details, and is what [`handle_error`](crate::domain::failure::handle_error)
//!   and [`safe_execute`](crate::domain::failure::safe_execute) produce.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// The main error type for library operations.
///
/// Most variants wrap errors from external crates using `#[from]` so that `?`
/// converts them automatically.
#[derive(Debug, Error)]
pub enum TableError {
    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An event carried values the table cannot act on.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration document could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON document (column configuration, form values) could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for library operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Error value tagged with an optional code and structured details.
///
/// This is the single error shape handed to the UI layer: failed data requests,
/// invalid column configuration and anything else run through
/// [`safe_execute`](crate::domain::failure::safe_execute) end up here.
///
/// # Examples
///
/// ```
/// use protable::ProTableError;
/// use serde_json::json;
///
/// let error = ProTableError::new("Test error")
///     .with_code("TEST_CODE")
///     .with_details(json!({ "foo": "bar" }).as_object().cloned().unwrap_or_default());
///
/// assert_eq!(error.to_string(), "Test error");
/// assert_eq!(error.code.as_deref(), Some("TEST_CODE"));
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ProTableError {
    /// Human-readable message, usually prefixed with the context label.
    pub message: String,

    /// Machine-readable error code (`UNKNOWN_ERROR`, `OBJECT_ERROR`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Structured details extracted from the original failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl ProTableError {
    /// Creates an error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
        }
    }

    /// Sets the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the structured details.
    #[must_use]
    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Some(details);
        self
    }
}

//! Conversion of raised failures into [`ProTableError`] values.
//!
//! Anything that can go wrong while the container runs an operation (a data
//! request, a user callback) is funnelled through [`handle_error`] or
//! [`safe_execute`]. Both tag the failure with a context label, extract a
//! best-effort code and details, record it through an
//! [`ErrorSink`](crate::observability::ErrorSink) and hand back a value instead
//! of propagating.

use super::error::{ProTableError, TableError};
use crate::observability::{ErrorEvent, ErrorSink, TracingSink};
use futures_util::FutureExt;
use serde_json::{Map, Value};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::Instrument;

/// Context label used when the caller does not supply one.
pub const DEFAULT_CONTEXT: &str = "ProTable";

const UNKNOWN_MESSAGE: &str = "unknown error";
const UNKNOWN_CODE: &str = "UNKNOWN_ERROR";
const OBJECT_CODE: &str = "OBJECT_ERROR";
const ERROR_CODE: &str = "ERROR";
const PANIC_CODE: &str = "PANIC";

/// Whatever a failing operation raised.
#[derive(Debug)]
pub enum Failure {
    /// An already wrapped error. Passed through untouched.
    Table(ProTableError),
    /// A Rust error value.
    Error(Box<dyn std::error::Error + Send + Sync>),
    /// A bare message.
    Message(String),
    /// A structured payload, typically an error body returned by a backend.
    Object(Value),
    /// A panic caught while polling an operation.
    Panic(String),
}

impl Failure {
    /// Builds a failure from a panic payload returned by `catch_unwind`.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| UNKNOWN_MESSAGE.to_string());
        Self::Panic(message)
    }
}

impl From<ProTableError> for Failure {
    fn from(error: ProTableError) -> Self {
        Self::Table(error)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

impl From<Value> for Failure {
    fn from(value: Value) -> Self {
        Self::Object(value)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Failure {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Error(error)
    }
}

impl From<std::io::Error> for Failure {
    fn from(error: std::io::Error) -> Self {
        Self::Error(Box::new(error))
    }
}

impl From<serde_json::Error> for Failure {
    fn from(error: serde_json::Error) -> Self {
        Self::Error(Box::new(error))
    }
}

impl From<TableError> for Failure {
    fn from(error: TableError) -> Self {
        Self::Error(Box::new(error))
    }
}

/// Wraps a failure using the default [`TracingSink`].
///
/// See [`handle_error_with`] for the extraction rules.
pub fn handle_error(failure: impl Into<Failure>, context: &str) -> ProTableError {
    handle_error_with(failure, context, &TracingSink)
}

/// Wraps a failure, records it through `sink`, and returns the tagged error.
///
/// # Extraction Rules
///
/// | Failure             | message                       | code                     | details                |
/// |---------------------|-------------------------------|--------------------------|------------------------|
/// | `Table`             | returned as is, not recorded  |                          |                        |
/// | `Error`             | `Display` of the error        | `ERROR`                  | `sources` chain        |
/// | `Message`           | the message                   | `UNKNOWN_ERROR`          | empty                  |
/// | `Object` (map)      | `message` field or JSON text  | `code` field or `OBJECT_ERROR` | the object       |
/// | `Object` (array)    | JSON text                     | `OBJECT_ERROR`           | empty                  |
/// | `Object` (string)   | the string                    | `UNKNOWN_ERROR`          | empty                  |
/// | `Object` (other)    | `unknown error`               | `UNKNOWN_ERROR`          | empty                  |
/// | `Panic`             | panic message                 | `PANIC`                  | empty                  |
///
/// The returned error's message is `"{context}: {message}"`.
pub fn handle_error_with<S: ErrorSink + ?Sized>(
    failure: impl Into<Failure>,
    context: &str,
    sink: &S,
) -> ProTableError {
    let (message, code, details) = match failure.into() {
        Failure::Table(error) => return error,
        Failure::Error(error) => {
            let mut sources = Vec::new();
            let mut source = error.source();
            while let Some(cause) = source {
                sources.push(Value::String(cause.to_string()));
                source = cause.source();
            }
            let mut details = Map::new();
            details.insert("sources".to_string(), Value::Array(sources));
            (error.to_string(), ERROR_CODE.to_string(), details)
        }
        Failure::Message(message) => (message, UNKNOWN_CODE.to_string(), Map::new()),
        Failure::Object(value) => extract_object(value),
        Failure::Panic(message) => (message, PANIC_CODE.to_string(), Map::new()),
    };

    sink.record(&ErrorEvent {
        context: context.to_string(),
        message: message.clone(),
        code: code.clone(),
        details: details.clone(),
    });

    ProTableError {
        message: format!("{context}: {message}"),
        code: Some(code),
        details: Some(details),
    }
}

fn extract_object(value: Value) -> (String, String, Map<String, Value>) {
    match value {
        Value::Object(object) => {
            let message = object
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map_or_else(|| Value::Object(object.clone()).to_string(), String::from);
            let code = object
                .get("code")
                .and_then(Value::as_str)
                .filter(|c| !c.is_empty())
                .unwrap_or(OBJECT_CODE)
                .to_string();
            (message, code, object)
        }
        Value::Array(_) => (value.to_string(), OBJECT_CODE.to_string(), Map::new()),
        Value::String(message) => (message, UNKNOWN_CODE.to_string(), Map::new()),
        _ => (UNKNOWN_MESSAGE.to_string(), UNKNOWN_CODE.to_string(), Map::new()),
    }
}

/// Runs an operation and converts any failure into a value, using [`TracingSink`].
///
/// See [`safe_execute_with`].
///
/// # Errors
///
/// Returns the wrapped [`ProTableError`] when the operation fails or panics.
pub async fn safe_execute<T, E, Fut>(
    operation: Fut,
    context: &str,
) -> std::result::Result<T, ProTableError>
where
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Into<Failure>,
{
    safe_execute_with(operation, context, &TracingSink).await
}

/// Runs an operation and converts any failure into a value.
///
/// An `Err` output or a panic while polling the operation is wrapped via
/// [`handle_error_with`]. Panics never escape this function.
///
/// # Errors
///
/// Returns the wrapped [`ProTableError`] when the operation fails or panics.
///
/// # Example
///
/// ```rust
/// use futures_util::FutureExt;
/// use protable::domain::failure::safe_execute_with;
/// use protable::observability::MemorySink;
///
/// let sink = MemorySink::default();
/// let result = safe_execute_with(async { Err::<u32, _>("Failed") }, "Test", &sink)
///     .now_or_never()
///     .expect("ready future");
///
/// assert_eq!(result.unwrap_err().message, "Test: Failed");
/// ```
pub async fn safe_execute_with<T, E, Fut, S>(
    operation: Fut,
    context: &str,
    sink: &S,
) -> std::result::Result<T, ProTableError>
where
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Into<Failure>,
    S: ErrorSink + ?Sized,
{
    let settled = AssertUnwindSafe(operation)
        .catch_unwind()
        .instrument(tracing::debug_span!("safe_execute", context = %context))
        .await;

    match settled {
        Ok(Ok(data)) => Ok(data),
        Ok(Err(error)) => Err(handle_error_with(error, context, sink)),
        Err(payload) => Err(handle_error_with(Failure::from_panic(payload), context, sink)),
    }
}

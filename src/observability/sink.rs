//! Pluggable destination for operational error events.
//!
//! Error handling helpers never write to a fixed output. They hand an
//! [`ErrorEvent`] to an [`ErrorSink`], which decides where it goes. The default
//! [`TracingSink`] forwards to `tracing`; [`MemorySink`] keeps events in memory
//! so embedders and tests can inspect them.

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Mutex;

/// A single recorded operational failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEvent {
    /// Context label supplied by the caller (e.g. `"ProTable"`, `"request"`).
    pub context: String,

    /// Message extracted from the failure, without the context prefix.
    pub message: String,

    /// Extracted or defaulted error code.
    pub code: String,

    /// Structured details extracted from the failure.
    pub details: Map<String, Value>,
}

/// Receives error events produced by
/// [`handle_error_with`](crate::domain::failure::handle_error_with).
pub trait ErrorSink {
    /// Records one error event.
    fn record(&self, event: &ErrorEvent);
}

/// Sink that emits every event as a `tracing` error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn record(&self, event: &ErrorEvent) {
        let details = Value::Object(event.details.clone());
        tracing::error!(
            context = %event.context,
            code = %event.code,
            details = %details,
            "{}",
            event.message
        );
    }
}

/// Sink that stores events in memory.
///
/// # Example
///
/// ```rust
/// use protable::observability::{ErrorSink, MemorySink};
/// use protable::domain::failure::handle_error_with;
///
/// let sink = MemorySink::default();
/// let error = handle_error_with("boom", "Test", &sink);
///
/// assert_eq!(error.message, "Test: boom");
/// assert_eq!(sink.events().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ErrorEvent>>,
}

impl MemorySink {
    /// Returns a snapshot of all recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> Vec<ErrorEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Returns `true` if no event has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().map_or(true, |events| events.is_empty())
    }
}

impl ErrorSink for MemorySink {
    fn record(&self, event: &ErrorEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for &S {
    fn record(&self, event: &ErrorEvent) {
        (**self).record(event);
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for std::sync::Arc<S> {
    fn record(&self, event: &ErrorEvent) {
        (**self).record(event);
    }
}

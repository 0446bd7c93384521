//! Data request contract and execution.
//!
//! The container does not know how data is fetched. It emits
//! [`Action::Request`](crate::app::Action::Request) with parameters built by
//! [`build_request_params`]; the runtime runs its fetch function through
//! [`run_request`], which never panics or propagates, and feeds the returned
//! event back into the handler.

use super::handler::Event;
use crate::domain::failure::{safe_execute_with, Failure};
use crate::domain::ProTableError;
use crate::form::{filter_empty, unflatten, FormValues};
use crate::observability::{ErrorSink, TracingSink};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;
use tracing::Instrument;

/// Context label attached to request failures.
pub const REQUEST_CONTEXT: &str = "request";

/// Response of a data request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResult {
    pub success: bool,

    #[serde(default)]
    pub data: Vec<Map<String, Value>>,

    #[serde(default)]
    pub total: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RequestResult {
    /// Successful result with the given rows and total count.
    #[must_use]
    pub fn ok(data: Vec<Map<String, Value>>, total: u64) -> Self {
        Self {
            success: true,
            data,
            total,
            message: None,
        }
    }
}

/// What a request settled with.
pub type RequestOutcome = std::result::Result<RequestResult, ProTableError>;

/// Builds request parameters from flat search values and paging.
///
/// Blank fields are dropped, paths are expanded into nested objects, then
/// `current` and `pageSize` are added (overriding form fields of the same name).
///
/// # Example
///
/// ```rust
/// use protable::app::build_request_params;
/// use serde_json::json;
///
/// let values = json!({ "user,name": "ann", "status": "" });
/// let params = build_request_params(values.as_object().unwrap(), 2, 20);
///
/// assert_eq!(
///     serde_json::Value::Object(params),
///     json!({ "user": { "name": "ann" }, "current": 2, "pageSize": 20 })
/// );
/// ```
#[must_use]
pub fn build_request_params(
    values: &FormValues,
    current: u32,
    page_size: u32,
) -> Map<String, Value> {
    let mut params = unflatten(&filter_empty(values));
    params.insert("current".to_string(), Value::from(current));
    params.insert("pageSize".to_string(), Value::from(page_size));
    params
}

/// Runs `fetch` with `params` and reports the outcome as an event.
///
/// Failures are recorded through [`TracingSink`].
pub async fn run_request<F, Fut, E>(fetch: F, seq: u64, params: Map<String, Value>) -> Event
where
    F: FnOnce(Map<String, Value>) -> Fut,
    Fut: Future<Output = std::result::Result<RequestResult, E>>,
    E: Into<Failure>,
{
    run_request_with(fetch, seq, params, &TracingSink).await
}

/// Runs `fetch` with `params`, recording failures through `sink`.
pub async fn run_request_with<F, Fut, E, S>(
    fetch: F,
    seq: u64,
    params: Map<String, Value>,
    sink: &S,
) -> Event
where
    F: FnOnce(Map<String, Value>) -> Fut,
    Fut: Future<Output = std::result::Result<RequestResult, E>>,
    E: Into<Failure>,
    S: ErrorSink + ?Sized,
{
    let outcome = safe_execute_with(fetch(params), REQUEST_CONTEXT, sink)
        .instrument(tracing::debug_span!("run_request", seq = seq))
        .await;
    tracing::debug!(seq = seq, ok = outcome.is_ok(), "request settled");
    Event::RequestSettled { seq, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::MemorySink;
    use futures_util::FutureExt;
    use serde_json::json;

    #[test]
    fn test_params_override_form_fields_named_like_paging() {
        let values = json!({ "current": "x", "keyword": "abc" });
        let params = build_request_params(values.as_object().unwrap(), 1, 10);
        assert_eq!(
            Value::Object(params),
            json!({ "current": 1, "pageSize": 10, "keyword": "abc" })
        );
    }

    #[test]
    fn test_request_result_deserializes_with_defaults() {
        let result: RequestResult =
            serde_json::from_value(json!({ "success": false, "message": "nope" })).unwrap();
        assert!(result.data.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_run_request_success() {
        let sink = MemorySink::default();
        let event = run_request_with(
            |params: Map<String, Value>| async move {
                Ok::<_, String>(RequestResult::ok(vec![params], 1))
            },
            7,
            Map::new(),
            &sink,
        )
        .now_or_never()
        .unwrap();

        assert_eq!(
            event,
            Event::RequestSettled {
                seq: 7,
                outcome: Ok(RequestResult::ok(vec![Map::new()], 1)),
            }
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_run_request_failure_is_wrapped() {
        let sink = MemorySink::default();
        let event = run_request_with(
            |_params| async { Err::<RequestResult, _>("Network error") },
            1,
            Map::new(),
            &sink,
        )
        .now_or_never()
        .unwrap();

        let Event::RequestSettled { seq, outcome } = event else {
            panic!("unexpected event");
        };
        assert_eq!(seq, 1);
        assert_eq!(outcome.unwrap_err().message, "request: Network error");
        assert_eq!(sink.events()[0].context, REQUEST_CONTEXT);
    }
}

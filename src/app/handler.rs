//! Event handling and state transition logic.
//!
//! The handler follows a unidirectional data flow:
//! 1. Events arrive from the embedding UI or from a settled request
//! 2. [`handle_event`] pattern-matches the event
//! 3. State mutations occur via [`TableState`] methods
//! 4. Actions are collected and returned for the runtime to execute
//!
//! Time never comes from a clock here. Events that depend on it (`FieldChanged`,
//! `Tick`, `Reload`) carry the instant they happened at, which keeps every
//! transition deterministic.
//!
//! # Example
//!
//! ```rust
//! use protable::app::{handle_event, Action, Event, TableProps, TableState};
//! use protable::columns::prepare_columns;
//! use protable::Config;
//! use serde_json::json;
//!
//! let config = Config::default();
//! let raw = json!([{ "title": "Name", "dataIndex": "name" }]);
//! let columns = prepare_columns(&raw, config.locale);
//! let mut state = TableState::new(columns, TableProps::default(), &config);
//!
//! let (render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Request { seq: 1, .. }));
//! # Ok::<(), protable::TableError>(())
//! ```

use super::actions::{Action, MessageKind};
use super::request::{RequestOutcome, REQUEST_CONTEXT};
use super::state::TableState;
use crate::domain::error::{Result, TableError};
use crate::domain::handle_error;
use crate::form::FormValues;
use std::time::Instant;

/// Events triggered by the user, the embedding runtime, or settled requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The table was mounted. Requests the first page unless `manualRequest`.
    Mount,

    /// The search form was submitted.
    ///
    /// Required fields are checked first; on success the search values are
    /// replaced, paging returns to page 1 and a request is issued.
    Search {
        /// Flat form values, keyed by field name.
        values: FormValues,
    },

    /// A search field changed. Submits `values` once the debounce delay has
    /// passed without further changes.
    FieldChanged {
        values: FormValues,
        at: Instant,
    },

    /// Time has advanced to the given instant. Fires a due debounced search.
    Tick(Instant),

    /// The search form was reset to the columns' default values.
    Reset,

    /// The user moved to another page or changed the page size.
    PageChange {
        /// 1-based page number.
        current: u32,
        page_size: u32,
    },

    /// Re-request the current page. Throttled.
    Reload {
        at: Instant,
    },

    /// An operation on the data succeeded. Shows `message` and re-requests the
    /// current page immediately.
    SuccessAndReload {
        message: String,
    },

    /// A request issued via [`Action::Request`] settled.
    RequestSettled {
        seq: u64,
        outcome: RequestOutcome,
    },
}

/// Processes an event, mutates table state, and returns actions to execute.
///
/// The returned flag tells the caller whether the view must be re-rendered.
///
/// # Errors
///
/// Returns [`TableError::InvalidInput`] for a `PageChange` with a zero page
/// number or page size. State is left untouched in that case.
pub fn handle_event(state: &mut TableState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Mount => {
            let mut actions = vec![];

            if let Some(error) = state.validation.to_error() {
                tracing::warn!(error = %error, "mounted with invalid columns");
                actions.push(Action::ShowMessage {
                    kind: MessageKind::Warning,
                    text: error.message,
                });
            }

            if state.props.manual_request {
                tracing::debug!("manual request, waiting for search or reload");
            } else {
                actions.push(state.begin_request());
            }

            Ok((true, actions))
        }
        Event::Search { values } => {
            state.search_debounce_mut().cancel();
            Ok(submit_search(state, values.clone()))
        }
        Event::FieldChanged { values, at } => {
            tracing::trace!(fields = values.len(), "search field changed");
            state.search_debounce_mut().schedule(values.clone(), *at);
            Ok((false, vec![]))
        }
        Event::Tick(now) => match state.search_debounce_mut().poll(*now) {
            Some(values) => {
                tracing::debug!("debounced search fired");
                Ok(submit_search(state, values))
            }
            None => Ok((false, vec![])),
        },
        Event::Reset => {
            state.search_debounce_mut().cancel();
            state.search_values = state.default_values.clone();
            state.form_errors.clear();
            state.page.current = 1;
            tracing::debug!(defaults = state.default_values.len(), "search reset");
            Ok((true, vec![state.begin_request()]))
        }
        Event::PageChange { current, page_size } => {
            if *current == 0 || *page_size == 0 {
                return Err(TableError::InvalidInput(format!(
                    "page {current} with page size {page_size}"
                )));
            }

            tracing::debug!(current = current, page_size = page_size, "page changed");
            state.page.current = *current;
            state.page.page_size = *page_size;
            Ok((true, vec![state.begin_request()]))
        }
        Event::Reload { at } => {
            if !state.reload_throttle_mut().try_acquire(*at) {
                tracing::debug!("reload throttled");
                return Ok((false, vec![]));
            }
            Ok((true, vec![state.begin_request()]))
        }
        Event::SuccessAndReload { message } => {
            let actions = vec![
                Action::ShowMessage {
                    kind: MessageKind::Success,
                    text: message.clone(),
                },
                state.begin_request(),
            ];
            Ok((true, actions))
        }
        Event::RequestSettled { seq, outcome } => {
            if !state.is_awaiting(*seq) {
                tracing::debug!(seq = seq, "ignoring superseded request");
                return Ok((false, vec![]));
            }
            state.settle();

            let error = match outcome {
                Ok(result) if result.success => {
                    tracing::debug!(
                        seq = seq,
                        rows = result.data.len(),
                        total = result.total,
                        "request succeeded"
                    );
                    state.rows.clone_from(&result.data);
                    state.page.total = result.total;
                    return Ok((true, vec![]));
                }
                Ok(result) => handle_error(
                    result.message.clone().unwrap_or_else(|| "request failed".to_string()),
                    REQUEST_CONTEXT,
                ),
                Err(error) => error.clone(),
            };

            state.rows.clear();
            state.page.total = 0;
            let text = error.message.clone();
            state.last_error = Some(error);
            Ok((
                true,
                vec![Action::ShowMessage {
                    kind: MessageKind::Error,
                    text,
                }],
            ))
        }
    }
}

fn submit_search(state: &mut TableState, values: FormValues) -> (bool, Vec<Action>) {
    let errors = state.check_required(&values);
    if !errors.is_empty() {
        tracing::debug!(missing = errors.len(), "search rejected");
        state.form_errors = errors;
        return (true, vec![]);
    }

    state.form_errors.clear();
    state.search_values = values;
    state.page.current = 1;
    (true, vec![state.begin_request()])
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mount => "mount",
        Event::Search { .. } => "search",
        Event::FieldChanged { .. } => "field_changed",
        Event::Tick(_) => "tick",
        Event::Reset => "reset",
        Event::PageChange { .. } => "page_change",
        Event::Reload { .. } => "reload",
        Event::SuccessAndReload { .. } => "success_and_reload",
        Event::RequestSettled { .. } => "request_settled",
    }
}

//! Actions representing side effects to be executed by the embedding runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` describing
//! what should happen next; the runtime issues data requests, shows messages,
//! and feeds results back in as events.
//!
//! # Example
//!
//! ```rust
//! use protable::app::{Action, MessageKind};
//!
//! let actions = vec![Action::ShowMessage {
//!     kind: MessageKind::Success,
//!     text: "saved".to_string(),
//! }];
//! assert_eq!(actions.len(), 1);
//! ```

use serde_json::{Map, Value};

/// Severity of a transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Warning,
    Error,
}

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Issues a data request.
    ///
    /// The runtime must answer with
    /// [`Event::RequestSettled`](crate::app::Event::RequestSettled) carrying the
    /// same `seq`; answers to superseded requests are ignored.
    Request {
        /// Sequence number identifying this request.
        seq: u64,
        /// Nested search values merged with `current` and `pageSize`.
        params: Map<String, Value>,
    },

    /// Shows a transient message to the user.
    ShowMessage {
        kind: MessageKind,
        text: String,
    },
}

//! Application layer coordinating table state, events, and actions.
//!
//! The container is headless. It sits between the embedding UI (which renders
//! view models and reports user input) and a data source it never calls
//! directly:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── RequestSettled ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`props`]: Per-table options
//! - [`request`]: Request parameters, results, and fetch execution
//! - [`state`]: Table state container and view model computation

pub mod actions;
pub mod handler;
pub mod props;
pub mod request;
pub mod state;

pub use actions::{Action, MessageKind};
pub use handler::{handle_event, Event};
pub use props::{PageOptions, SearchOptions, TableOptions, TableProps};
pub use request::{
    build_request_params, run_request, run_request_with, RequestOutcome, RequestResult,
    REQUEST_CONTEXT,
};
pub use state::{FieldError, PageState, TableState};

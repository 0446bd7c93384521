//! Logging setup and error-event sinks.
//!
//! Every transform and state transition emits `tracing` spans and events. This
//! module installs a subscriber for them and defines where operational errors
//! produced by [`handle_error`](crate::domain::handle_error) are recorded.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use protable::observability::init_tracing;
//! use protable::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("table initialized");
//! ```

mod init;
pub mod sink;

pub use init::init_tracing;
pub use sink::{ErrorEvent, ErrorSink, MemorySink, TracingSink};

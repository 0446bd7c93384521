//! Rate limiting for UI event callbacks.
//!
//! Both wrappers are single-threaded and poll-driven: they never spawn threads
//! or arm OS timers. The owning event loop supplies the time through a
//! [`Clock`] (or passes an [`Instant`](std::time::Instant) directly to the
//! bare [`DebounceTimer`] / [`ThrottleWindow`]).
//!
//! - [`debounce`]: run once after a quiet period, with the last arguments
//! - [`throttle`]: run at most once per window, on the leading edge
//! - [`clock`]: time sources

pub mod clock;
pub mod debounce;
pub mod throttle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::{Debounce, DebounceTimer};
pub use throttle::{Throttle, ThrottleWindow};

//! Trailing-edge debouncing.
//!
//! Every call restarts the quiet period and replaces the pending arguments. Once
//! the period elapses without another call, the callback runs once with the
//! arguments of the last call.
//!
//! Timers here are polled, not armed: the owning event loop calls `poll` on its
//! own tick, so there is never more than one pending deadline and nothing runs
//! behind the caller's back.

use super::clock::{Clock, SystemClock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<A> {
    deadline: Instant,
    args: A,
}

/// Debounce bookkeeping without a callback.
///
/// Holds at most one pending argument set and its deadline. Owners that cannot
/// store a closure (state machines that react to the result themselves) use this
/// directly; [`Debounce`] wraps it with a callback and a clock.
#[derive(Debug, Clone)]
pub struct DebounceTimer<A> {
    delay: Duration,
    pending: Option<Pending<A>>,
}

impl<A> DebounceTimer<A> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Stores `args` and restarts the quiet period at `now`.
    pub fn schedule(&mut self, args: A, now: Instant) {
        self.pending = Some(Pending {
            deadline: now + self.delay,
            args,
        });
    }

    /// Returns the pending arguments once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<A> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.args),
            _ => None,
        }
    }

    /// Returns the pending arguments immediately, ignoring the deadline.
    pub fn take(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.args)
    }

    /// Drops the pending call, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

/// Debounced callback.
///
/// # Example
///
/// ```rust
/// use protable::timing::{Debounce, ManualClock};
/// use std::cell::RefCell;
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let seen = RefCell::new(Vec::new());
/// let mut search = Debounce::with_clock(
///     |query: &str| seen.borrow_mut().push(query.to_string()),
///     Duration::from_millis(100),
///     &clock,
/// );
///
/// search.call("r");
/// search.call("ru");
/// search.call("rust");
/// clock.advance(Duration::from_millis(150));
/// search.poll();
///
/// assert_eq!(*seen.borrow(), vec!["rust"]);
/// ```
pub struct Debounce<A, F, C = SystemClock> {
    timer: DebounceTimer<A>,
    callback: F,
    clock: C,
}

impl<A, F: FnMut(A)> Debounce<A, F, SystemClock> {
    /// Debounces `callback` against the system clock.
    pub const fn new(callback: F, delay: Duration) -> Self {
        Self {
            timer: DebounceTimer::new(delay),
            callback,
            clock: SystemClock,
        }
    }
}

impl<A, F: FnMut(A), C: Clock> Debounce<A, F, C> {
    pub const fn with_clock(callback: F, delay: Duration, clock: C) -> Self {
        Self {
            timer: DebounceTimer::new(delay),
            callback,
            clock,
        }
    }

    /// Records a call; the callback runs later from [`poll`](Self::poll).
    pub fn call(&mut self, args: A) {
        let now = self.clock.now();
        self.timer.schedule(args, now);
    }

    /// Runs the callback if the quiet period has elapsed. Returns `true` if it ran.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        self.timer.poll(now).map(&mut self.callback).is_some()
    }

    /// Runs the pending callback now. Returns `true` if there was one.
    pub fn flush(&mut self) -> bool {
        self.timer.take().map(&mut self.callback).is_some()
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }
}

impl<A, F, C> std::fmt::Debug for Debounce<A, F, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounce")
            .field("delay", &self.timer.delay)
            .field("pending", &self.timer.pending.is_some())
            .finish_non_exhaustive()
    }
}

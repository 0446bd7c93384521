//! Leading-edge throttling.
//!
//! The first call runs immediately and opens a window; calls inside the window
//! are dropped. The first call after the window closes runs again and opens a
//! new window.

use super::clock::{Clock, SystemClock};
use std::time::{Duration, Instant};

/// Throttle bookkeeping without a callback.
#[derive(Debug, Clone)]
pub struct ThrottleWindow {
    window: Duration,
    open_until: Option<Instant>,
}

impl ThrottleWindow {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            open_until: None,
        }
    }

    /// Returns `true` if a call at `now` may run, and opens a new window if so.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if self.is_throttled(now) {
            return false;
        }
        self.open_until = Some(now + self.window);
        true
    }

    #[must_use]
    pub fn is_throttled(&self, now: Instant) -> bool {
        self.open_until.is_some_and(|until| now < until)
    }

    /// Closes the current window early.
    pub fn reset(&mut self) {
        self.open_until = None;
    }
}

/// Throttled callback.
///
/// # Example
///
/// ```rust
/// use protable::timing::{ManualClock, Throttle};
/// use std::cell::Cell;
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let count = Cell::new(0);
/// let window = Duration::from_millis(100);
/// let mut reload = Throttle::with_clock(|()| count.set(count.get() + 1), window, &clock);
///
/// reload.call(());
/// reload.call(());
/// assert_eq!(count.get(), 1);
///
/// clock.advance(Duration::from_millis(150));
/// reload.call(());
/// assert_eq!(count.get(), 2);
/// ```
pub struct Throttle<A, F, C = SystemClock> {
    window: ThrottleWindow,
    callback: F,
    clock: C,
    _args: std::marker::PhantomData<fn(A)>,
}

impl<A, F: FnMut(A)> Throttle<A, F, SystemClock> {
    /// Throttles `callback` against the system clock.
    pub const fn new(callback: F, window: Duration) -> Self {
        Self {
            window: ThrottleWindow::new(window),
            callback,
            clock: SystemClock,
            _args: std::marker::PhantomData,
        }
    }
}

impl<A, F: FnMut(A), C: Clock> Throttle<A, F, C> {
    pub const fn with_clock(callback: F, window: Duration, clock: C) -> Self {
        Self {
            window: ThrottleWindow::new(window),
            callback,
            clock,
            _args: std::marker::PhantomData,
        }
    }

    /// Runs the callback unless a window is open. Returns `true` if it ran.
    pub fn call(&mut self, args: A) -> bool {
        let now = self.clock.now();
        if !self.window.try_acquire(now) {
            return false;
        }
        (self.callback)(args);
        true
    }

    pub fn reset(&mut self) {
        self.window.reset();
    }
}

impl<A, F, C> std::fmt::Debug for Throttle<A, F, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::ManualClock;
    use std::cell::RefCell;

    const WINDOW: Duration = Duration::from_millis(100);

    #[test]
    fn test_rapid_calls_invoke_once() {
        let clock = ManualClock::new();
        let calls = RefCell::new(Vec::new());
        let mut throttled =
            Throttle::with_clock(|n: u32| calls.borrow_mut().push(n), WINDOW, &clock);

        assert!(throttled.call(1));
        assert!(!throttled.call(2));
        assert!(!throttled.call(3));
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[test]
    fn test_call_after_window_invokes_again() {
        let clock = ManualClock::new();
        let calls = RefCell::new(Vec::new());
        let mut throttled =
            Throttle::with_clock(|n: u32| calls.borrow_mut().push(n), WINDOW, &clock);

        throttled.call(1);
        clock.advance(Duration::from_millis(150));
        assert!(throttled.call(2));
        clock.advance(Duration::from_millis(50));
        assert!(!throttled.call(3));
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_window_boundary_and_reset() {
        let start = Instant::now();
        let mut window = ThrottleWindow::new(WINDOW);

        assert!(window.try_acquire(start));
        assert!(window.is_throttled(start + Duration::from_millis(99)));
        assert!(window.try_acquire(start + WINDOW));

        window.reset();
        assert!(window.try_acquire(start + WINDOW));
    }
}

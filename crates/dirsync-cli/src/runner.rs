//! Periodic driving loop
//!
//! Strictly sequential: run a pass, sleep the full interval, run the next.
//! A slow pass delays the following one; passes never overlap.

use std::ops::ControlFlow;
use std::time::Duration;

/// Repeats a pass on a fixed interval
pub struct SyncLoop<S> {
    interval: Duration,
    sleep: S,
}

impl SyncLoop<fn(Duration)> {
    /// Loop that blocks the current thread between passes
    pub fn new(interval: Duration) -> Self {
        Self::with_sleep(interval, std::thread::sleep)
    }
}

impl<S: FnMut(Duration)> SyncLoop<S> {
    /// Loop with a custom sleep function
    pub const fn with_sleep(interval: Duration, sleep: S) -> Self {
        Self { interval, sleep }
    }

    /// Run passes until one returns [`ControlFlow::Break`]
    ///
    /// `pass` receives the zero-based pass number. Returns the number of
    /// passes run. An interval of zero re-runs immediately.
    pub fn run<F>(&mut self, mut pass: F) -> u64
    where
        F: FnMut(u64) -> ControlFlow<()>,
    {
        let mut count = 0;
        loop {
            let flow = pass(count);
            count += 1;
            if flow.is_break() {
                return count;
            }
            if !self.interval.is_zero() {
                (self.sleep)(self.interval);
            }
        }
    }
}

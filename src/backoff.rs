//! This module provides a [`Backoff`] that the worker uses to busy-wait with
//! a preemptive yield once the queue has stayed empty for a while.
//!
//! It follows the API of `crossbeam::Backoff`, reduced to what waiting needs.
use crate::hints::likely;
use core::cell::Cell;
use core::fmt;

const SPIN_LIMIT: u32 = 6;

/// Performs exponential backoff in spin loops.
///
/// Each step of the back off procedure takes roughly twice as long as the previous
/// step until [`SPIN_LIMIT`] is reached, after which every step yields the current
/// thread to the OS scheduler.
pub(crate) struct Backoff {
    step: Cell<u32>,
}

impl Backoff {
    /// Creates a new `Backoff` instance.
    #[inline]
    pub(crate) fn new() -> Self {
        Self { step: Cell::new(0) }
    }

    /// Resets the backoff state.
    ///
    /// The worker calls it after every dequeued item, so a busy queue is always
    /// polled at full speed.
    #[inline]
    pub(crate) fn reset(&self) {
        self.step.set(0);
    }

    /// Backs off in a blocking loop.
    ///
    /// The processor may yield using the *YIELD* or *PAUSE* instruction, and the current thread
    /// may yield by giving up a timeslice to the OS scheduler.
    #[inline]
    pub(crate) fn snooze(&self) {
        if likely(self.step.get() <= SPIN_LIMIT) {
            for _ in 0..1 << self.step.get() {
                crate::loom_bindings::hint::spin_loop();
            }
        } else {
            crate::loom_bindings::thread::yield_now();
        }

        self.step.set(self.step.get().saturating_add(1));
    }

    /// Returns `true` if exponential backoff has completed and blocking the thread is advised.
    #[inline]
    pub(crate) fn is_completed(&self) -> bool {
        self.step.get() > SPIN_LIMIT
    }
}

impl fmt::Debug for Backoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backoff")
            .field("step", &self.step)
            .field("is_completed", &self.is_completed())
            .finish()
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(queue_poller_loom)))]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_completes_and_resets() {
        let backoff = Backoff::new();

        for _ in 0..=SPIN_LIMIT {
            assert!(!backoff.is_completed());

            backoff.snooze();
        }

        assert!(backoff.is_completed());

        // Yielding steps keep it completed.
        backoff.snooze();
        assert!(backoff.is_completed());

        backoff.reset();
        assert!(!backoff.is_completed());
    }
}

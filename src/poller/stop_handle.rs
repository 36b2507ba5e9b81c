use super::worker::RunSignal;
use crate::backoff::Backoff;
use crate::errors::PollerError;
use crate::loom_bindings::thread::JoinHandle;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long a completed [`Backoff`] sleeps between two checks of the worker.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Returned by [`Poller::stop_listening`](crate::Poller::stop_listening).
///
/// Waiting on it is optional: dropping it leaves the worker to exit on its own.
/// The worker exits after the handler call it is in, if any, and leaves the rest
/// of the queue untouched.
pub struct StopHandle {
    signal: Option<Arc<RunSignal>>,
    thread: Option<JoinHandle<()>>,
}

impl StopHandle {
    pub(crate) fn new(signal: Arc<RunSignal>, thread: Option<JoinHandle<()>>) -> Self {
        Self {
            signal: Some(signal),
            thread,
        }
    }

    /// A handle for a poller that had no worker to stop.
    pub(crate) fn finished() -> Self {
        Self {
            signal: None,
            thread: None,
        }
    }

    /// Returns whether the worker has exited.
    pub fn is_finished(&self) -> bool {
        self.signal.as_ref().is_none_or(|signal| !signal.is_alive())
    }

    /// Waits for the worker to exit.
    ///
    /// Only the handle returned by the call that requested the stop owns the thread
    /// and can observe how it ended. Other handles wait for the exit and return `Ok`.
    pub fn join(mut self) -> Result<(), PollerError> {
        if let Some(thread) = self.thread.take() {
            return thread.join().map_err(|_| PollerError::WorkerPanicked);
        }

        self.wait_exit(None);

        Ok(())
    }

    /// Waits at most `timeout` for the worker to exit.
    ///
    /// Returns `Ok(true)` if the worker has exited and `Ok(false)` on timeout,
    /// in which case the handle can be waited on again.
    pub fn join_timeout(&mut self, timeout: Duration) -> Result<bool, PollerError> {
        if !self.wait_exit(Some(Instant::now() + timeout)) {
            return Ok(false);
        }

        if let Some(thread) = self.thread.take() {
            thread.join().map_err(|_| PollerError::WorkerPanicked)?;
        }

        Ok(true)
    }

    /// Waits for the worker to mark its run as exited. Returns `false` if `deadline` passed first.
    fn wait_exit(&self, deadline: Option<Instant>) -> bool {
        let backoff = Backoff::new();

        while !self.is_finished() {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return false;
            }

            if backoff.is_completed() {
                std::thread::sleep(EXIT_POLL_INTERVAL);
            } else {
                backoff.snooze();
            }
        }

        true
    }
}

impl fmt::Debug for StopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopHandle")
            .field("is_finished", &self.is_finished())
            .field("owns_thread", &self.thread.is_some())
            .finish()
    }
}

//! This module provides the [`PollerError`] returned by the lifecycle operations
//! of a [`Poller`](crate::Poller).
use std::io;

/// Represents the possible errors of starting, stopping and joining a poller.
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    /// [`start_listening`](crate::Poller::start_listening) was called while a worker
    /// was running and no stop had been requested.
    #[error("the poller is already running")]
    AlreadyRunning,
    /// The OS refused to spawn the worker thread.
    #[error("failed to spawn the worker thread")]
    Spawn(#[source] io::Error),
    /// The worker thread panicked outside of a handler call.
    #[error("the worker thread panicked")]
    WorkerPanicked,
}

//! This module provides the [`Poller`]: a queue drained by one background worker thread.
//!
//! # Lifecycle
//!
//! ```text
//!          start_listening             stop_listening          worker exits
//!   Idle ─────────────────▶ Running ─────────────────▶ Stopping ────────────▶ Idle
//!    ▲                         │
//!    └─────────────────────────┘
//!      FailurePolicy::StopWorker
//! ```
//!
//! Producers keep enqueuing in every state. Items that are not consumed before a stop
//! stay in the queue for the next run.
mod stop_handle;
pub(crate) mod worker;

pub use stop_handle::StopHandle;

use crate::config::PollerConfig;
use crate::errors::PollerError;
use crate::failure::{FailureSink, TracingFailureSink};
use crate::handler::Handler;
use crate::loom_bindings::sync::Mutex;
use crate::loom_bindings::thread::{Builder, JoinHandle};
use crate::queue::ConcurrentQueue;
use crate::stats::PollerStats;
use std::fmt;
use std::sync::Arc;
use worker::{RunSignal, Worker};

/// The lifecycle state of a [`Poller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollerState {
    /// No worker is running.
    Idle,
    /// A worker is consuming the queue.
    Running,
    /// A stop was requested and the worker has not exited yet.
    Stopping,
}

/// The worker of the latest run.
struct Run {
    signal: Arc<RunSignal>,
    /// Taken by the [`StopHandle`] of the first stop request.
    thread: Option<JoinHandle<()>>,
}

/// A [`ConcurrentQueue`] whose items are handed one by one to a [`Handler`]
/// on a dedicated background thread.
///
/// At most one worker thread runs per poller, and the handler is never called
/// concurrently with itself. The worker thread is detached, so a poller that was
/// never stopped does not keep the process alive, and it runs at the lowest
/// priority unless [`PollerConfig::priority`] says otherwise.
///
/// Dropping the poller requests a stop without waiting for the worker.
///
/// # Example
///
/// ```rust
/// use queue_poller::{handler_fn, Poller};
/// use std::sync::mpsc;
///
/// let (tx, rx) = mpsc::channel();
/// let poller = Poller::new(handler_fn(move |item: u32| tx.send(item * 2).unwrap()));
/// let producer = poller.queue();
///
/// producer.enqueue(1);
/// producer.enqueue(2);
///
/// poller.start_listening().unwrap();
///
/// assert_eq!(rx.recv().unwrap(), 2);
/// assert_eq!(rx.recv().unwrap(), 4);
///
/// poller.stop_listening().join().unwrap();
/// ```
pub struct Poller<T, H> {
    queue: ConcurrentQueue<T>,
    handler: Arc<Mutex<H>>,
    failure_sink: Arc<dyn FailureSink>,
    config: PollerConfig,
    stats: Arc<PollerStats>,
    current: Mutex<Option<Run>>,
}

impl<T, H> Poller<T, H>
where
    T: Send + 'static,
    H: Handler<T>,
{
    /// Creates an idle poller with an empty queue and the default [`PollerConfig`].
    pub fn new(handler: H) -> Self {
        Self::with_config(handler, PollerConfig::default())
    }

    /// Creates an idle poller with an empty queue.
    pub fn with_config(handler: H, config: PollerConfig) -> Self {
        Self::with_queue(handler, ConcurrentQueue::new(), config)
    }

    /// Creates an idle poller that consumes `queue`.
    ///
    /// Items already in `queue` are consumed once the poller is started.
    pub fn with_queue(handler: H, queue: ConcurrentQueue<T>, config: PollerConfig) -> Self {
        Self {
            queue,
            handler: Arc::new(Mutex::new(handler)),
            failure_sink: Arc::new(TracingFailureSink),
            config,
            stats: Arc::new(PollerStats::default()),
            current: Mutex::new(None),
        }
    }

    /// Replaces the [`TracingFailureSink`] that receives handler failures.
    ///
    /// It takes effect from the next [`start_listening`](Self::start_listening).
    #[must_use]
    pub fn with_failure_sink(mut self, failure_sink: impl FailureSink) -> Self {
        self.failure_sink = Arc::new(failure_sink);
        self
    }

    /// Spawns the worker thread.
    ///
    /// The new worker starts consuming once the worker of a previous run, if it is still
    /// finishing its last item, has exited.
    ///
    /// # Errors
    ///
    /// * [`PollerError::AlreadyRunning`] if a worker is running and no stop was requested.
    ///   No second worker is spawned.
    /// * [`PollerError::Spawn`] if the thread could not be spawned.
    pub fn start_listening(&self) -> Result<(), PollerError> {
        let mut current = self.current.lock();

        if let Some(run) = current.as_ref() {
            if run.signal.is_alive() && !run.signal.is_stop_requested() {
                tracing::warn!(
                    thread = %self.config.thread_name,
                    "start requested while the queue poller is already running"
                );

                return Err(PollerError::AlreadyRunning);
            }
        }

        let signal = Arc::new(RunSignal::new());
        let worker = Worker {
            queue: self.queue.clone(),
            handler: Arc::clone(&self.handler),
            failure_sink: Arc::clone(&self.failure_sink),
            stats: Arc::clone(&self.stats),
            signal: Arc::clone(&signal),
            priority: self.config.priority,
            idle_strategy: self.config.idle_strategy,
            failure_policy: self.config.failure_policy,
        };

        let mut builder = Builder::new().name(self.config.thread_name.clone());

        if let Some(stack_size) = self.config.stack_size {
            builder = builder.stack_size(stack_size);
        }

        let thread = builder
            .spawn(move || worker.run())
            .map_err(PollerError::Spawn)?;

        self.stats.record_run_started();

        tracing::debug!(
            thread = %self.config.thread_name,
            run = self.stats.runs_started(),
            queued = self.queue.len(),
            "queue poller started"
        );

        *current = Some(Run {
            signal,
            thread: Some(thread),
        });

        Ok(())
    }
}

impl<T, H> Poller<T, H> {
    /// Requests the worker to stop and returns at once.
    ///
    /// The worker notices the request before its next dequeue. The returned [`StopHandle`]
    /// can be used to wait for it; dropping the handle does not cancel the stop.
    ///
    /// Calling it on an idle poller, or several times, has no further effect.
    pub fn stop_listening(&self) -> StopHandle {
        let mut current = self.current.lock();

        let Some(run) = current.as_mut() else {
            return StopHandle::finished();
        };

        if run.signal.request_stop() {
            // Wakes a worker sleeping with `IdleStrategy::Block`.
            self.queue.notify_all();

            tracing::debug!(thread = %self.config.thread_name, "queue poller stop requested");
        }

        StopHandle::new(Arc::clone(&run.signal), run.thread.take())
    }

    /// Returns the current [`PollerState`].
    pub fn state(&self) -> PollerState {
        match self.current.lock().as_ref() {
            Some(run) if run.signal.is_alive() => {
                if run.signal.is_stop_requested() {
                    PollerState::Stopping
                } else {
                    PollerState::Running
                }
            }
            _ => PollerState::Idle,
        }
    }

    /// Returns whether a worker is consuming the queue.
    ///
    /// It turns `false` as soon as a stop is requested or the worker ends its run after
    /// a handler failure under [`FailurePolicy::StopWorker`](crate::FailurePolicy::StopWorker).
    pub fn is_running(&self) -> bool {
        self.state() == PollerState::Running
    }

    /// Returns a handle producers can enqueue through.
    pub fn queue(&self) -> ConcurrentQueue<T> {
        self.queue.clone()
    }

    /// Enqueues `item`. The same as `self.queue().enqueue(item)`.
    pub fn enqueue(&self, item: T) {
        self.queue.enqueue(item);
    }

    /// Returns the counters shared by every run of this poller.
    pub fn stats(&self) -> &PollerStats {
        &self.stats
    }

    /// Returns the configuration every new run starts with.
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }
}

impl<T, H> Drop for Poller<T, H> {
    fn drop(&mut self) {
        if let Some(run) = self.current.lock().as_ref() {
            if run.signal.request_stop() {
                self.queue.notify_all();
            }
        }
    }
}

impl<T, H> fmt::Debug for Poller<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("state", &self.state())
            .field("queued", &self.queue.len())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

use crate::backoff::Backoff;
use crate::cache_padded::CachePaddedAtomicBool;
use crate::config::{FailurePolicy, IdleStrategy, ThreadPriority};
use crate::failure::{FailureSink, HandlerFailure};
use crate::handler::Handler;
use crate::hints::unlikely;
use crate::loom_bindings::hint::spin_loop;
use crate::loom_bindings::sync::Mutex;
use crate::queue::ConcurrentQueue;
use crate::stats::PollerStats;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Flags shared by the controller and the worker of one run.
///
/// Every run gets fresh flags, so a worker that is still finishing its last item
/// after a stop can never be revived by the next start.
pub(crate) struct RunSignal {
    stop: CachePaddedAtomicBool,
    alive: CachePaddedAtomicBool,
}

impl RunSignal {
    pub(crate) fn new() -> Self {
        Self {
            stop: CachePaddedAtomicBool::new(false),
            alive: CachePaddedAtomicBool::new(true),
        }
    }

    /// Returns `true` only for the call that actually requested the stop.
    pub(crate) fn request_stop(&self) -> bool {
        !self.stop.swap(true, Ordering::AcqRel)
    }

    #[inline]
    pub(crate) fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

/// Marks the run as exited however the worker leaves, unwinding included.
struct ExitGuard<'signal>(&'signal RunSignal);

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        self.0.alive.store(false, Ordering::Release);
    }
}

/// Everything the worker thread of one run owns.
pub(crate) struct Worker<T, H> {
    pub(crate) queue: ConcurrentQueue<T>,
    pub(crate) handler: Arc<Mutex<H>>,
    pub(crate) failure_sink: Arc<dyn FailureSink>,
    pub(crate) stats: Arc<PollerStats>,
    pub(crate) signal: Arc<RunSignal>,
    pub(crate) priority: Option<ThreadPriority>,
    pub(crate) idle_strategy: IdleStrategy,
    pub(crate) failure_policy: FailurePolicy,
}

impl<T, H: Handler<T>> Worker<T, H> {
    /// The body of the worker thread: polls the queue until a stop is requested.
    pub(crate) fn run(self) {
        let _exit = ExitGuard(&self.signal);

        if let Some(priority) = self.priority {
            // On failure the worker keeps the inherited priority.
            if let Err(err) = thread_priority::set_current_thread_priority(priority) {
                tracing::warn!(?priority, error = ?err, "failed to set the queue worker priority");
            }
        }

        // The worker of the previous run may still be inside its last handler call.
        // Holding the handler for the whole run keeps at most one worker consuming.
        let mut handler = self.handler.lock();
        let backoff = Backoff::new();

        tracing::debug!(
            idle_strategy = ?self.idle_strategy,
            priority = ?self.priority,
            "queue worker started"
        );

        loop {
            if unlikely(self.signal.is_stop_requested()) {
                break;
            }

            let Some(item) = self.next_item() else {
                self.idle(&backoff);

                continue;
            };

            backoff.reset();

            if let Err(failure) = self.dispatch(&mut *handler, item) {
                self.failure_sink.report(&failure);

                if self.failure_policy == FailurePolicy::StopWorker {
                    tracing::warn!(error = %failure, "queue worker stopped after a handler failure");

                    break;
                }
            }
        }

        tracing::debug!(
            processed = self.stats.processed(),
            left_in_queue = self.queue.len(),
            "queue worker exited"
        );
    }

    #[inline]
    fn next_item(&self) -> Option<T> {
        match self.idle_strategy {
            IdleStrategy::Block { timeout } => self
                .queue
                .wait_dequeue(timeout, || self.signal.is_stop_requested()),
            IdleStrategy::BusySpin | IdleStrategy::Backoff => self.queue.try_dequeue(),
        }
    }

    #[inline]
    fn idle(&self, backoff: &Backoff) {
        match self.idle_strategy {
            IdleStrategy::BusySpin => spin_loop(),
            IdleStrategy::Backoff => backoff.snooze(),
            // `wait_dequeue` already waited.
            IdleStrategy::Block { .. } => {}
        }
    }

    /// Calls the handler once, turning a returned error or a panic into a [`HandlerFailure`].
    fn dispatch(&self, handler: &mut H, item: T) -> Result<(), HandlerFailure> {
        tracing::trace!("dispatching a dequeued item");

        let failure = match catch_unwind(AssertUnwindSafe(|| handler.execute(item))) {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(HandlerFailure::Error(err)),
            Err(payload) => Some(HandlerFailure::from_panic(payload.as_ref())),
        };

        // `failed` first: whoever sees the item as processed also sees its failure.
        if failure.is_some() {
            self.stats.record_failed();
        }

        self.stats.record_processed();

        failure.map_or(Ok(()), Err)
    }
}

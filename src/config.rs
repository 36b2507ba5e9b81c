//! This module provides the [`PollerConfig`].
use std::time::Duration;

pub use thread_priority::ThreadPriority;

/// The default name of the worker thread.
pub const DEFAULT_THREAD_NAME: &str = "queue-poller";

/// The default scheduling priority of the worker thread: the lowest one for its policy.
pub const DEFAULT_PRIORITY: ThreadPriority = ThreadPriority::Min;

/// The default `timeout` of [`IdleStrategy::Block`].
pub const DEFAULT_BLOCK_TIMEOUT: Duration = Duration::from_millis(100);

/// What the worker does when it finds the queue empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdleStrategy {
    /// Re-check the stop flag and the queue at once.
    ///
    /// It has the lowest latency between an enqueue and the handler call and keeps one core
    /// busy for as long as the poller runs.
    #[default]
    BusySpin,
    /// Spin with exponential backoff, then yield the thread to the OS scheduler.
    /// The backoff is reset after every dequeued item.
    Backoff,
    /// Sleep on the queue until an item is enqueued, a stop is requested or `timeout` elapses.
    Block {
        /// The longest single wait.
        timeout: Duration,
    },
}

impl IdleStrategy {
    /// Returns [`IdleStrategy::Block`] with [`DEFAULT_BLOCK_TIMEOUT`].
    pub const fn block() -> Self {
        Self::Block {
            timeout: DEFAULT_BLOCK_TIMEOUT,
        }
    }
}

/// What the worker does after reporting a handler failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep consuming the queue.
    #[default]
    Continue,
    /// End the current run. [`Poller::is_running`](crate::Poller::is_running) turns `false`
    /// and the poller can be started again.
    StopWorker,
}

/// Configuration of a [`Poller`](crate::Poller).
///
/// # Example
///
/// ```rust
/// use queue_poller::{FailurePolicy, IdleStrategy, PollerConfig};
///
/// let config = PollerConfig::default()
///     .with_thread_name("audit-log")
///     .with_idle_strategy(IdleStrategy::block())
///     .with_failure_policy(FailurePolicy::StopWorker);
///
/// assert_eq!(config.thread_name, "audit-log");
/// assert!(config.priority.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    /// The name given to every worker thread.
    pub thread_name: String,
    /// The stack size of the worker thread. `None` uses the platform default.
    pub stack_size: Option<usize>,
    /// The priority the worker thread sets for itself before it starts consuming.
    /// `None` keeps the priority inherited from the thread that started the poller.
    ///
    /// A priority the OS refuses is logged and the worker runs at the inherited one.
    pub priority: Option<ThreadPriority>,
    /// What the worker does when the queue is empty.
    pub idle_strategy: IdleStrategy,
    /// What the worker does after a handler failure.
    pub failure_policy: FailurePolicy,
}

impl PollerConfig {
    /// Sets [`thread_name`](Self::thread_name).
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Sets [`stack_size`](Self::stack_size).
    #[must_use]
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    /// Sets [`priority`](Self::priority). `None` keeps the inherited priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Option<ThreadPriority>) -> Self {
        self.priority = priority;
        self
    }

    /// Sets [`idle_strategy`](Self::idle_strategy).
    #[must_use]
    pub fn with_idle_strategy(mut self, idle_strategy: IdleStrategy) -> Self {
        self.idle_strategy = idle_strategy;
        self
    }

    /// Sets [`failure_policy`](Self::failure_policy).
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            stack_size: None,
            priority: Some(DEFAULT_PRIORITY),
            idle_strategy: IdleStrategy::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

//! This module provides the [`ConcurrentQueue`].
use crate::loom_bindings::sync::{Arc, Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::sync::PoisonError;
use std::time::Duration;

/// State shared by every clone of a [`ConcurrentQueue`].
struct Shared<T> {
    items: Mutex<VecDeque<T>>,
    not_empty: Condvar,
}

/// An unbounded FIFO queue that any number of producers can push into
/// while one worker pops from it.
///
/// It is a wrapper around `Arc<(Mutex<VecDeque<T>>, Condvar)>`, so cloning it is cheap
/// and every clone refers to the same queue. Producers never lock anything themselves.
///
/// Items pushed from one thread are popped in the order they were pushed.
/// Items pushed concurrently from several threads are popped in some interleaving
/// of those pushes.
///
/// # Example
///
/// ```rust
/// use queue_poller::ConcurrentQueue;
///
/// let queue = ConcurrentQueue::new();
/// let producer = queue.clone();
///
/// producer.enqueue(1);
/// producer.enqueue(2);
///
/// assert_eq!(queue.try_dequeue(), Some(1));
/// assert_eq!(queue.try_dequeue(), Some(2));
/// assert_eq!(queue.try_dequeue(), None);
/// ```
pub struct ConcurrentQueue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> ConcurrentQueue<T> {
    /// Creates a new empty `ConcurrentQueue`.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                items: Mutex::new(VecDeque::new()),
                not_empty: Condvar::new(),
            }),
        }
    }

    /// Returns the number of items waiting in the queue.
    ///
    /// It is only a snapshot: producers and the worker may change it right after.
    pub fn len(&self) -> usize {
        self.shared.items.lock().len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.shared.items.lock().is_empty()
    }

    /// Appends `item` to the tail of the queue. It never fails and never blocks
    /// for longer than another push or pop takes.
    pub fn enqueue(&self, item: T) {
        self.shared.items.lock().push_back(item);
        self.shared.not_empty.notify_one();
    }

    /// Appends all items of `iter` to the tail of the queue, in order,
    /// without letting other producers interleave between them.
    pub fn extend<I: IntoIterator<Item = T>>(&self, iter: I) {
        let mut items = self.shared.items.lock();
        let before = items.len();

        items.extend(iter);

        if items.len() != before {
            self.shared.not_empty.notify_one();
        }
    }

    /// Removes and returns the head of the queue, or returns `None` at once if the queue is empty.
    pub fn try_dequeue(&self) -> Option<T> {
        self.shared.items.lock().pop_front()
    }

    /// Removes and returns the head of the queue, waiting up to `timeout`
    /// for a producer if the queue is empty.
    ///
    /// It may return `None` before `timeout` elapses on a spurious wakeup.
    pub fn dequeue_timeout(&self, timeout: Duration) -> Option<T> {
        self.wait_dequeue(timeout, || false)
    }

    /// Like [`dequeue_timeout`](Self::dequeue_timeout), but gives up without waiting
    /// when `should_stop` returns `true`.
    ///
    /// `should_stop` is checked while the queue lock is held, so a stop request followed by
    /// [`notify_all`](Self::notify_all) cannot be missed between the check and the wait.
    pub(crate) fn wait_dequeue(
        &self,
        timeout: Duration,
        should_stop: impl Fn() -> bool,
    ) -> Option<T> {
        let mut items = self.shared.items.lock();

        if let Some(item) = items.pop_front() {
            return Some(item);
        }

        if should_stop() {
            return None;
        }

        let (mut items, _) = self
            .shared
            .not_empty
            .wait_timeout(items, timeout)
            .unwrap_or_else(PoisonError::into_inner);

        items.pop_front()
    }

    /// Wakes every thread blocked in [`wait_dequeue`](Self::wait_dequeue).
    pub(crate) fn notify_all(&self) {
        // Taking the lock orders this wakeup after any `should_stop` check in progress.
        drop(self.shared.items.lock());

        self.shared.not_empty.notify_all();
    }
}

impl<T> Clone for ConcurrentQueue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Default for ConcurrentQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ConcurrentQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentQueue")
            .field("len", &self.len())
            .finish()
    }
}

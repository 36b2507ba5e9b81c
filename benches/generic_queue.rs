//! Generic traits for queue benchmarking.

use queue_poller::ConcurrentQueue;
use std::sync::Arc;

/// Generic interface for an unbounded multi-producer queue.
pub trait GenericQueue<T>: Clone + Send {
    fn new() -> Self;
    fn push(&self, item: T);
    fn pop(&self) -> Option<T>;
}

impl<T: Send> GenericQueue<T> for ConcurrentQueue<T> {
    fn new() -> Self {
        Self::new()
    }

    fn push(&self, item: T) {
        self.enqueue(item);
    }

    fn pop(&self) -> Option<T> {
        self.try_dequeue()
    }
}

impl<T: Send> GenericQueue<T> for Arc<crossbeam_queue::SegQueue<T>> {
    fn new() -> Self {
        Arc::new(crossbeam_queue::SegQueue::new())
    }

    fn push(&self, item: T) {
        crossbeam_queue::SegQueue::push(self, item);
    }

    fn pop(&self) -> Option<T> {
        crossbeam_queue::SegQueue::pop(self)
    }
}

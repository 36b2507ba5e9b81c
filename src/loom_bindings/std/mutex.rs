use std::sync::{self, MutexGuard, PoisonError};

/// Adapter for `std::Mutex` that removes the poisoning aspects
/// from its API.
///
/// A handler that panics while the worker holds a lock must not make the
/// queue or the handler unusable for the next run.
#[derive(Debug, Default)]
pub(crate) struct Mutex<T: ?Sized>(sync::Mutex<T>);

impl<T> Mutex<T> {
    #[inline]
    pub(crate) fn new(t: T) -> Self {
        Self(sync::Mutex::new(t))
    }

    #[cfg_attr(not(test), allow(dead_code, reason = "Only the test lock is static."))]
    #[inline]
    pub(crate) const fn const_new(t: T) -> Self {
        Self(sync::Mutex::new(t))
    }
}

impl<T: ?Sized> Mutex<T> {
    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

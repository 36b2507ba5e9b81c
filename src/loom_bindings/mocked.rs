//! `loom` counterparts of [`std`](super::std) used by the model tests.

pub(crate) mod hint {
    pub(crate) use loom::hint::spin_loop;
}

pub(crate) mod sync {
    pub(crate) use loom::sync::{Arc, Condvar, MutexGuard};
    use std::sync::PoisonError;

    /// Poison-free adapter over `loom::sync::Mutex`.
    #[derive(Debug)]
    pub(crate) struct Mutex<T>(loom::sync::Mutex<T>);

    impl<T> Mutex<T> {
        pub(crate) fn new(t: T) -> Self {
            Self(loom::sync::Mutex::new(t))
        }

        pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl<T: Default> Default for Mutex<T> {
        fn default() -> Self {
            Self::new(T::default())
        }
    }

    pub(crate) mod atomic {
        pub(crate) use loom::sync::atomic::{AtomicBool, AtomicU64};
    }
}

pub(crate) mod thread {
    use std::io;

    pub(crate) use loom::thread::{yield_now, JoinHandle};

    /// Mirrors the parts of `std::thread::Builder` the poller uses.
    /// Loom threads have neither names nor configurable stacks.
    #[derive(Debug, Default)]
    pub(crate) struct Builder;

    impl Builder {
        pub(crate) fn new() -> Self {
            Self
        }

        pub(crate) fn name(self, _name: String) -> Self {
            self
        }

        pub(crate) fn stack_size(self, _size: usize) -> Self {
            self
        }

        pub(crate) fn spawn<F, T>(self, f: F) -> io::Result<JoinHandle<T>>
        where
            F: FnOnce() -> T + Send + 'static,
            T: Send + 'static,
        {
            Ok(loom::thread::spawn(f))
        }
    }
}

mod mutex;

pub(crate) mod hint {
    pub(crate) use std::hint::spin_loop;
}

pub(crate) mod sync {
    pub(crate) use std::sync::{Arc, Condvar};

    pub(crate) use crate::loom_bindings::std::mutex::Mutex;

    pub(crate) mod atomic {
        pub(crate) use std::sync::atomic::{AtomicBool, AtomicU64};
    }
}

pub(crate) mod thread {
    #[inline]
    pub(crate) fn yield_now() {
        std::thread::yield_now();
    }

    pub(crate) use std::thread::{Builder, JoinHandle};
}

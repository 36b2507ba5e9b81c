//! This module abstracts over `loom` and `std::sync` depending on whether we
//! are running loom tests or not.
//!
//! The rest of the crate imports its threads, locks and atomics only from here.

#[cfg(not(all(test, queue_poller_loom)))]
mod std;
#[cfg(not(all(test, queue_poller_loom)))]
pub(crate) use self::std::*;

#[cfg(all(test, queue_poller_loom))]
mod mocked;
#[cfg(all(test, queue_poller_loom))]
pub(crate) use self::mocked::*;

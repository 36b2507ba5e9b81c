#![deny(clippy::all)]
#![deny(clippy::assertions_on_result_states)]
#![deny(clippy::match_wild_err_arm)]
#![deny(clippy::allow_attributes_without_reason)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(
    clippy::missing_const_for_fn,
    reason = "Since we cannot make a constant function non-constant after its release,
    we need to look for a reason to make it constant, and not vice versa."
)]
#![allow(clippy::inline_always, reason = "The poll loop is hot.")]
#![allow(
    clippy::must_use_candidate,
    reason = "It is better to developer think about it."
)]
#![allow(
    clippy::module_name_repetitions,
    reason = "This is acceptable most of the time."
)]
#![allow(clippy::redundant_pub_crate, reason = "It improves readability.")]
#![allow(
    rustdoc::private_intra_doc_links,
    reason = "It allows to create more readable docs."
)]
//! A consumer that drains a [`ConcurrentQueue`] on a background thread.
//!
//! Producers push values into the queue from any thread and never wait for them
//! to be processed. A [`Poller`] owns the queue and, once
//! [started](Poller::start_listening), hands every dequeued value to a [`Handler`]
//! on its own worker thread until it is [stopped](Poller::stop_listening).
//!
//! * [`Poller`]: the start/stop lifecycle. At most one worker per poller,
//!   restartable, stop never blocks and returns an optional [`StopHandle`].
//! * [`ConcurrentQueue`]: the unbounded multi-producer FIFO.
//! * [`Handler`]: what to do with an item. See [`handler_fn`], [`try_handler_fn`]
//!   and [`WriteHandler`].
//! * [`FailureSink`]: where handler errors and panics are reported
//!   ([`TracingFailureSink`] by default).
//! * [`PollerConfig`]: the thread name, stack size and [`ThreadPriority`] of the worker,
//!   the [`IdleStrategy`] and the [`FailurePolicy`].
mod backoff;
mod cache_padded;
pub mod config;
pub mod errors;
pub mod failure;
pub mod handler;
mod hints;
#[cfg(all(queue_poller_loom, test))]
mod loom;
mod loom_bindings;
pub mod poller;
pub mod queue;
pub mod stats;
#[cfg(all(test, not(queue_poller_loom)))]
mod test_lock;

pub use config::{FailurePolicy, IdleStrategy, PollerConfig, ThreadPriority};
pub use errors::PollerError;
pub use failure::{FailureSink, HandlerFailure, TracingFailureSink};
pub use handler::{
    handler_fn, try_handler_fn, FnHandler, Handler, HandlerError, TryFnHandler, WriteHandler,
};
pub use poller::{Poller, PollerState, StopHandle};
pub use queue::ConcurrentQueue;
pub use stats::PollerStats;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct ReadmeDoctests;

//! This module provides the [`HandlerFailure`] and the [`FailureSink`] that receives it.
//!
//! The worker never lets a failing handler end consumption silently: every returned
//! error and every panic is turned into a [`HandlerFailure`] and reported.
use crate::handler::HandlerError;
use std::any::Any;
use std::error::Error as _;

/// A failed [`Handler::execute`](crate::Handler::execute) call.
#[derive(Debug, thiserror::Error)]
pub enum HandlerFailure {
    /// The handler returned an error.
    #[error("handler returned an error")]
    Error(#[source] HandlerError),
    /// The handler panicked. Contains the panic message when it was a string.
    #[error("handler panicked: {0}")]
    Panic(String),
}

impl HandlerFailure {
    /// Creates a [`HandlerFailure::Panic`] from the payload returned by `catch_unwind`.
    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "<non-string panic payload>".to_owned()
        };

        Self::Panic(message)
    }

    /// Returns whether the handler panicked.
    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panic(_))
    }
}

/// Receives handler failures on the worker thread.
///
/// Any `Fn(&HandlerFailure) + Send + Sync` closure is a `FailureSink`.
pub trait FailureSink: Send + Sync + 'static {
    /// Reports a failure. It is called on the worker thread, right after the failed call
    /// and before the next item is dequeued.
    fn report(&self, failure: &HandlerFailure);
}

impl<F> FailureSink for F
where
    F: Fn(&HandlerFailure) + Send + Sync + 'static,
{
    fn report(&self, failure: &HandlerFailure) {
        self(failure);
    }
}

/// The default [`FailureSink`]: logs every failure with [`tracing::error!`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn report(&self, failure: &HandlerFailure) {
        let thread = std::thread::current();

        tracing::error!(
            error = %failure,
            cause = failure.source().map(tracing::field::display),
            panic = failure.is_panic(),
            thread = thread.name().unwrap_or("<unnamed>"),
            "queue handler failed"
        );
    }
}

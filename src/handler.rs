//! This module provides the [`Handler`] capability and its ready-made implementations.
use std::fmt::Display;
use std::io::{self, Write};

/// The error a [`Handler`] may return.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Processes the items dequeued by a [`Poller`](crate::Poller).
///
/// [`execute`](Handler::execute) is called exactly once per dequeued item,
/// synchronously, on the worker thread, in dequeue order.
/// Two calls never overlap for the same poller.
///
/// A returned error or a panic does not end consumption by default; it is
/// reported to the poller's [`FailureSink`](crate::FailureSink) and the
/// [`FailurePolicy`](crate::FailurePolicy) decides what happens next.
pub trait Handler<T>: Send + 'static {
    /// Processes one item.
    fn execute(&mut self, item: T) -> Result<(), HandlerError>;
}

impl<T, H: Handler<T> + ?Sized> Handler<T> for Box<H> {
    fn execute(&mut self, item: T) -> Result<(), HandlerError> {
        (**self).execute(item)
    }
}

/// A [`Handler`] made from an infallible closure. Created by [`handler_fn`].
#[derive(Debug, Clone)]
pub struct FnHandler<F>(F);

/// Wraps an `FnMut(T)` closure as a [`Handler`].
///
/// # Example
///
/// ```rust
/// use queue_poller::{handler_fn, Handler};
///
/// let mut sum = 0;
/// let mut handler = handler_fn(move |x: u32| sum += x);
///
/// handler.execute(1).unwrap();
/// ```
pub fn handler_fn<T, F>(f: F) -> FnHandler<F>
where
    F: FnMut(T) + Send + 'static,
{
    FnHandler(f)
}

impl<T, F> Handler<T> for FnHandler<F>
where
    F: FnMut(T) + Send + 'static,
{
    #[inline]
    fn execute(&mut self, item: T) -> Result<(), HandlerError> {
        (self.0)(item);

        Ok(())
    }
}

/// A [`Handler`] made from a fallible closure. Created by [`try_handler_fn`].
#[derive(Debug, Clone)]
pub struct TryFnHandler<F>(F);

/// Wraps an `FnMut(T) -> Result<(), E>` closure as a [`Handler`].
pub fn try_handler_fn<T, E, F>(f: F) -> TryFnHandler<F>
where
    E: Into<HandlerError>,
    F: FnMut(T) -> Result<(), E> + Send + 'static,
{
    TryFnHandler(f)
}

impl<T, E, F> Handler<T> for TryFnHandler<F>
where
    E: Into<HandlerError>,
    F: FnMut(T) -> Result<(), E> + Send + 'static,
{
    #[inline]
    fn execute(&mut self, item: T) -> Result<(), HandlerError> {
        (self.0)(item).map_err(Into::into)
    }
}

/// Writes every item on its own line.
///
/// It is the console consumer: [`WriteHandler::stdout`] prints each dequeued value.
/// I/O errors are returned to the poller and reported like any other handler failure.
#[derive(Debug)]
pub struct WriteHandler<W> {
    writer: W,
}

impl WriteHandler<io::Stdout> {
    /// Creates a `WriteHandler` that prints to the standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> WriteHandler<W> {
    /// Creates a `WriteHandler` over `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<T, W> Handler<T> for WriteHandler<W>
where
    T: Display,
    W: Write + Send + 'static,
{
    fn execute(&mut self, item: T) -> Result<(), HandlerError> {
        writeln!(self.writer, "{item}")?;
        self.writer.flush()?;

        Ok(())
    }
}

#[cfg(all(test, not(queue_poller_loom)))]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_handler_writes_lines() {
        let mut handler = WriteHandler::new(Vec::new());

        handler.execute(1).unwrap();
        handler.execute("two").unwrap();
        handler.execute(3.5).unwrap();

        assert_eq!(handler.into_inner(), b"1\ntwo\n3.5\n");
    }

    #[test]
    fn test_write_handler_returns_io_errors() {
        let mut handler = WriteHandler::new(BrokenPipe);

        let err = Handler::<u8>::execute(&mut handler, 1).unwrap_err();

        assert_eq!(err.to_string(), "reader went away");
    }

    #[test]
    fn test_try_handler_fn() {
        let mut handler = try_handler_fn(|x: i32| {
            if x < 0 {
                return Err(format!("negative item {x}"));
            }

            Ok(())
        });

        assert!(handler.execute(1).is_ok());
        assert_eq!(handler.execute(-1).unwrap_err().to_string(), "negative item -1");
    }

    #[test]
    fn test_boxed_handler() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut handler: Box<dyn Handler<u8>> = Box::new(handler_fn(move |x: u8| {
            tx.send(x).unwrap();
        }));

        handler.execute(5).unwrap();

        assert_eq!(rx.recv().unwrap(), 5);
    }
}

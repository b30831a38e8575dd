use crate::Error;

/// Reporting interface for pool events.
///
/// The pool never logs on its own; every error and informational event goes
/// through the configured observer. Implementations are invoked concurrently
/// from caller threads, the maintainer and overflow-disposal threads.
pub trait Observer: Send + Sync + 'static {
    /// An operational error occurred.
    fn error(&self, error: &Error);

    /// An informational event occurred.
    fn message(&self, message: &str);
}

/// Default [`Observer`] forwarding events to the `tracing` ecosystem.
///
/// Errors are emitted at `ERROR` level, informational events at `DEBUG`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn error(&self, error: &Error) {
        tracing::error!("{error}");
    }

    fn message(&self, message: &str) {
        tracing::debug!("{message}");
    }
}

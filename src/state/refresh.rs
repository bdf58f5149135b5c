//! Refresh actions and cooperative polling of in-flight refreshes.
//!
//! A refresh handler either settles immediately or hands back a future. The
//! container polls that future on each event-loop tick with a no-op waker,
//! so no executor is needed and the loop is never blocked.

use crate::model::RefreshError;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::task::{Context, Poll};
use tracing::debug;

/// Result of invoking a refresh handler.
pub enum RefreshCall {
    /// The handler completed (or failed) synchronously.
    Settled(Result<(), RefreshError>),
    /// The handler returned work that settles later.
    Pending(LocalBoxFuture<'static, Result<(), RefreshError>>),
}

impl RefreshCall {
    /// Synchronous success.
    pub fn done() -> Self {
        Self::Settled(Ok(()))
    }

    /// Wrap a future that settles later.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<(), RefreshError>> + 'static,
    {
        Self::Pending(future.boxed_local())
    }
}

impl std::fmt::Debug for RefreshCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Settled(result) => f.debug_tuple("Settled").field(result).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Action invoked once per threshold-crossing gesture.
///
/// Failures should be reported as `RefreshCall::Settled(Err(..))` or through
/// the returned future. A handler that panics is treated as
/// [`RefreshError::Abandoned`].
pub trait RefreshHandler {
    /// Start a refresh.
    fn on_refresh(&mut self) -> RefreshCall;
}

impl<F> RefreshHandler for F
where
    F: FnMut() -> RefreshCall,
{
    fn on_refresh(&mut self) -> RefreshCall {
        self()
    }
}

/// Hook notified of swallowed refresh failures.
pub type ErrorObserver = Box<dyn FnMut(&RefreshError)>;

/// An in-flight refresh.
pub struct PendingRefresh {
    future: LocalBoxFuture<'static, Result<(), RefreshError>>,
}

impl PendingRefresh {
    /// Track a refresh future.
    pub fn new(future: LocalBoxFuture<'static, Result<(), RefreshError>>) -> Self {
        Self { future }
    }

    /// Poll once without blocking.
    pub fn poll(&mut self) -> Poll<Result<(), RefreshError>> {
        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        self.future.poll_unpin(&mut cx)
    }
}

/// Run `job` on a worker thread and return a call that settles when it finishes.
///
/// A panicking job drops its sender, which surfaces as [`RefreshError::Abandoned`].
pub fn spawn_refresh<J>(job: J) -> RefreshCall
where
    J: FnOnce() -> Result<(), RefreshError> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let result = job();
        if tx.send(result).is_err() {
            debug!("refresh finished after its receiver was dropped");
        }
    });

    RefreshCall::pending(rx.map(|received| match received {
        Ok(result) => result,
        Err(oneshot::Canceled) => Err(RefreshError::Abandoned),
    }))
}

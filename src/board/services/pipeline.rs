//! Optimistic mutation pipeline: background persistence handles and retry.

use super::{BoardError, BoardResult, RetryPolicy};
use crate::board::ports::{GatewayError, GatewayResult};
use std::future::Future;
use tokio::{runtime::Handle, task::JoinHandle};

/// How a locally committed mutation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The service accepted the change and its canonical record was applied.
    Persisted,
    /// The service accepted the change, but a newer local or remote change
    /// had already replaced it; the response was discarded.
    Stale,
    /// A precondition did not hold; nothing changed and nothing was sent.
    Skipped,
}

/// Handle to the persistence half of an optimistic mutation.
///
/// The local half has already been committed when the handle is returned.
/// Dropping the handle detaches the background task; awaiting
/// [`PendingSync::settled`] yields its result after any rollback has been
/// applied.
#[derive(Debug)]
#[must_use = "dropping the handle ignores persistence failures"]
pub struct PendingSync<T> {
    inner: Inner<T>,
}

#[derive(Debug)]
enum Inner<T> {
    Ready(BoardResult<T>),
    Spawned(JoinHandle<BoardResult<T>>),
}

impl<T> PendingSync<T>
where
    T: Send + 'static,
{
    /// Wraps an already known result.
    pub(crate) const fn ready(result: BoardResult<T>) -> Self {
        Self {
            inner: Inner::Ready(result),
        }
    }

    /// Runs the persistence half on `runtime`.
    pub(crate) fn spawn<F>(runtime: &Handle, future: F) -> Self
    where
        F: Future<Output = BoardResult<T>> + Send + 'static,
    {
        Self {
            inner: Inner::Spawned(runtime.spawn(future)),
        }
    }

    /// Returns `true` once the result is available.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        match &self.inner {
            Inner::Ready(_) => true,
            Inner::Spawned(handle) => handle.is_finished(),
        }
    }

    /// Waits for the persistence half to finish.
    ///
    /// # Errors
    ///
    /// Returns the persistence error after the local change has been
    /// reverted, or [`BoardError::SyncAborted`] if the background task died.
    pub async fn settled(self) -> BoardResult<T> {
        match self.inner {
            Inner::Ready(result) => result,
            Inner::Spawned(handle) => match handle.await {
                Ok(result) => result,
                Err(err) => Err(BoardError::SyncAborted(err.to_string())),
            },
        }
    }
}

impl PendingSync<SyncOutcome> {
    /// A handle for a mutation whose precondition did not hold.
    pub(crate) const fn skipped() -> Self {
        Self::ready(Ok(SyncOutcome::Skipped))
    }
}

/// Runs `call` until it succeeds, fails with a non-retryable error, or the
/// policy's attempts are used up, sleeping with exponential backoff between
/// attempts.
pub(crate) async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut call: F,
) -> GatewayResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = GatewayResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                let delay = policy.backoff_after(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "persistence call failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Logs a persistence failure that triggered a rollback.
pub(crate) fn log_rollback(operation: &'static str, id: &str, err: &GatewayError, reverted: bool) {
    tracing::warn!(
        operation,
        task_id = id,
        reverted,
        error = %err,
        "persistence failed"
    );
}

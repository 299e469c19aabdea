//! Service-level errors for board operations.

use crate::board::{
    domain::{BoardDomainError, ColumnId, TaskId},
    ports::{GatewayError, TimerChannelError},
};
use thiserror::Error;

/// Errors surfaced by [`super::BoardStore`] operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The persistence service failed or rejected the request.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The timer channel failed.
    #[error(transparent)]
    TimerChannel(#[from] TimerChannelError),

    /// The column is not part of the board layout.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// A subtask was requested under a task that is not on the board.
    #[error("parent task not found: {0}")]
    ParentNotFound(TaskId),

    /// The entity still carries a placeholder identifier.
    #[error("task {0} has not been persisted yet")]
    PendingCreation(TaskId),

    /// Neither a current Tokio runtime nor a configured runtime handle is
    /// available to persist the change.
    #[error("no Tokio runtime available for background sync")]
    NoRuntime,

    /// The background persistence task panicked or was cancelled.
    #[error("background sync aborted: {0}")]
    SyncAborted(String),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

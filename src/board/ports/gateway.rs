//! Persistence port for the remote task service.

use crate::board::domain::{Task, TaskId, TaskKind};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Full record sent to the persistence service.
///
/// The service keeps tasks and subtasks in separate collections, so every
/// payload carries the `taskType` discriminator alongside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    task_type: TaskKind,
    #[serde(flatten)]
    task: Task,
}

impl TaskPayload {
    /// Builds the payload for a task or subtask record.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        Self {
            task_type: task.kind(),
            task: task.clone(),
        }
    }

    /// Returns the discriminator.
    #[must_use]
    pub const fn task_type(&self) -> TaskKind {
        self.task_type
    }

    /// Returns the record.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Consumes the payload and returns the record.
    #[must_use]
    pub fn into_task(self) -> Task {
        self.task
    }

    /// Returns `true` when any attachment carries local bytes, which
    /// requires a multipart upload instead of a JSON body.
    #[must_use]
    pub fn has_binary_attachments(&self) -> bool {
        self.task
            .attachments()
            .iter()
            .any(|attachment| attachment.content().is_some())
    }
}

/// Remote persistence contract.
///
/// The service is the durable source of truth: every call returns the
/// canonical record, which may differ from what the client sent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Persists a new task or subtask and returns the stored record with its
    /// assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when a subtask references an
    /// unknown parent, [`GatewayError::Rejected`] when the service refuses
    /// the record, or [`GatewayError::Transport`] on network failure.
    async fn create_task(&self, payload: &TaskPayload) -> GatewayResult<Task>;

    /// Replaces the stored record for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when nothing is stored under `id`,
    /// [`GatewayError::Rejected`] or [`GatewayError::Transport`] otherwise.
    async fn update_task(&self, id: &TaskId, payload: &TaskPayload) -> GatewayResult<Task>;

    /// Returns every top-level task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] or [`GatewayError::Rejected`]
    /// when the snapshot cannot be fetched.
    async fn get_all_tasks(&self) -> GatewayResult<Vec<Task>>;

    /// Returns a single record from the collection named by `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] when no such record exists.
    async fn get_task_by_id(&self, id: &TaskId, kind: TaskKind) -> GatewayResult<Task>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// No record exists under the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The service refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The request did not reach the service or the response was lost.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns `true` for failures that may succeed when retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

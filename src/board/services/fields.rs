//! Field edits on tasks and subtasks.

use super::{
    BoardError, BoardStore, PendingSync, SyncOutcome,
    index::Placement,
    pipeline::{log_rollback, with_retry},
    store::lock,
};
use crate::board::{
    domain::{Attachment, BoardDomainError, ColumnId, Priority, Task, TaskId},
    ports::{TaskGateway, TaskPayload},
};
use mockable::Clock;

/// A single-field edit. Applying the value captured from the previous
/// state undoes it.
#[derive(Debug, Clone)]
enum FieldChange {
    Title(String),
    Priority(Priority),
    Estimate(String),
    Description(String),
    Attachments(Vec<Attachment>),
    Subtasks(Vec<Task>),
}

impl FieldChange {
    const fn operation(&self) -> &'static str {
        match self {
            Self::Title(_) => "set_title",
            Self::Priority(_) => "set_priority",
            Self::Estimate(_) => "set_estimate",
            Self::Description(_) => "set_description",
            Self::Attachments(_) => "set_attachments",
            Self::Subtasks(_) => "set_subtasks",
        }
    }

    /// Returns the change that restores `entity`'s current value.
    fn inverse(&self, entity: &Task) -> Self {
        match self {
            Self::Title(_) => Self::Title(entity.title().to_owned()),
            Self::Priority(_) => Self::Priority(entity.priority()),
            Self::Estimate(_) => Self::Estimate(entity.estimate().to_owned()),
            Self::Description(_) => Self::Description(entity.description().to_owned()),
            Self::Attachments(_) => Self::Attachments(entity.attachments().to_vec()),
            Self::Subtasks(_) => Self::Subtasks(entity.subtasks().to_vec()),
        }
    }

    fn apply(self, entity: &mut Task) {
        match self {
            Self::Title(title) => entity.set_title(title),
            Self::Priority(priority) => entity.set_priority(priority),
            Self::Estimate(estimate) => entity.set_estimate(estimate),
            Self::Description(description) => entity.set_description(description),
            Self::Attachments(attachments) => entity.set_attachments(attachments),
            Self::Subtasks(subtasks) => entity.set_subtasks(subtasks),
        }
    }
}

impl<G, C> BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Renames a task or subtask.
    ///
    /// A blank title fails immediately with
    /// [`BoardDomainError::EmptyTitle`] and changes nothing.
    pub fn set_title(
        &self,
        task_id: &TaskId,
        column: &ColumnId,
        title: impl Into<String>,
    ) -> PendingSync<SyncOutcome> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return PendingSync::ready(Err(BoardDomainError::EmptyTitle.into()));
        }
        self.mutate_field(task_id, column, FieldChange::Title(trimmed.to_owned()))
    }

    /// Sets the priority of a task or subtask.
    pub fn set_priority(
        &self,
        task_id: &TaskId,
        column: &ColumnId,
        priority: Priority,
    ) -> PendingSync<SyncOutcome> {
        self.mutate_field(task_id, column, FieldChange::Priority(priority))
    }

    /// Sets the time estimate of a task or subtask.
    pub fn set_estimate(
        &self,
        task_id: &TaskId,
        column: &ColumnId,
        estimate: impl Into<String>,
    ) -> PendingSync<SyncOutcome> {
        self.mutate_field(task_id, column, FieldChange::Estimate(estimate.into()))
    }

    /// Sets the description of a task or subtask.
    pub fn set_description(
        &self,
        task_id: &TaskId,
        column: &ColumnId,
        description: impl Into<String>,
    ) -> PendingSync<SyncOutcome> {
        self.mutate_field(task_id, column, FieldChange::Description(description.into()))
    }

    /// Replaces the attachments of a task or subtask.
    pub fn set_attachments(
        &self,
        task_id: &TaskId,
        column: &ColumnId,
        attachments: Vec<Attachment>,
    ) -> PendingSync<SyncOutcome> {
        self.mutate_field(task_id, column, FieldChange::Attachments(attachments))
    }

    /// Replaces the subtask list of a task.
    pub fn set_subtasks(
        &self,
        task_id: &TaskId,
        column: &ColumnId,
        subtasks: Vec<Task>,
    ) -> PendingSync<SyncOutcome> {
        self.mutate_field(task_id, column, FieldChange::Subtasks(subtasks))
    }

    /// Shared algorithm for every field edit.
    ///
    /// The id is looked up in `column` first; failing that it is treated as
    /// a subtask and routed to its parent. Anything else is skipped.
    fn mutate_field(
        &self,
        task_id: &TaskId,
        column: &ColumnId,
        change: FieldChange,
    ) -> PendingSync<SyncOutcome> {
        if task_id.is_placeholder() {
            return PendingSync::ready(Err(BoardError::PendingCreation(task_id.clone())));
        }
        let operation = change.operation();
        let runtime = match self.runtime() {
            Ok(runtime) => runtime,
            Err(err) => return PendingSync::ready(Err(err)),
        };

        let (version, payload, inverse) = {
            let mut state = self.write_state();
            let routed = state.index.position(column, task_id).is_some()
                || matches!(
                    state.index.placement(task_id),
                    Some(Placement::Subtask { .. })
                );
            let Some(current) = state.index.entity(task_id).filter(|_| routed) else {
                tracing::debug!(%task_id, %column, operation, "edit skipped: entity not found");
                return PendingSync::skipped();
            };
            let inverse = change.inverse(current);
            let Some((_, after)) = state.index.update(task_id, |entity| change.apply(entity))
            else {
                return PendingSync::skipped();
            };
            let version = state.versions.stamp(task_id);
            (version, TaskPayload::for_task(&after), inverse)
        };

        let state = self.state.clone();
        let gateway = self.gateway.clone();
        let retry = self.config.retry;
        let id = task_id.clone();
        PendingSync::spawn(&runtime, async move {
            let result = with_retry(&retry, operation, || gateway.update_task(&id, &payload)).await;
            let mut guard = lock(&state);
            match result {
                Ok(record) => {
                    if !guard.versions.is_current(&id, version) {
                        tracing::debug!(task_id = %id, operation, "discarding stale response");
                        return Ok(SyncOutcome::Stale);
                    }
                    guard.index.replace(&id, record);
                    Ok(SyncOutcome::Persisted)
                }
                Err(err) => {
                    let current = guard.versions.is_current(&id, version);
                    if current {
                        guard.index.update(&id, |entity| inverse.apply(entity));
                        guard.versions.stamp(&id);
                    }
                    log_rollback(operation, id.as_str(), &err, current);
                    Err(err.into())
                }
            }
        })
    }
}

//! Task and subtask creation with placeholder reconciliation.

use super::{
    BoardError, BoardResult, BoardState, BoardStore, ColumnIndex, PendingSync, VersionLedger,
    store::lock,
};
use crate::board::{
    domain::{ColumnId, Task, TaskDraft, TaskId},
    ports::{TaskGateway, TaskPayload},
};
use mockable::Clock;

/// Receipt for an optimistic creation.
///
/// The placeholder entity is on the board when the ticket is returned.
#[derive(Debug)]
#[must_use = "dropping the ticket ignores creation failures"]
pub struct CreateTicket {
    placeholder: TaskId,
    pending: PendingSync<Task>,
}

impl CreateTicket {
    /// Returns the placeholder identifier occupying the new slot.
    #[must_use]
    pub const fn placeholder(&self) -> &TaskId {
        &self.placeholder
    }

    /// Returns `true` once the service has answered.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending.is_settled()
    }

    /// Waits for the canonical record.
    ///
    /// # Errors
    ///
    /// Returns the persistence error after the placeholder has been removed.
    pub async fn settled(self) -> BoardResult<Task> {
        self.pending.settled().await
    }
}

impl<G, C> BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a task in `column`, or a subtask when the draft names a
    /// parent.
    ///
    /// A placeholder is inserted at the end of the column (or the parent's
    /// subtask list) before this returns. When the service answers, the
    /// placeholder is replaced in place by the stored record; when it
    /// fails, the placeholder is removed. Creation is not retried, since a
    /// lost response could otherwise store the task twice.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownColumn`] when `column` is not on the
    /// board, [`BoardError::ParentNotFound`] when the parent is not a task on
    /// the board, [`BoardError::PendingCreation`] when the parent itself is
    /// still a placeholder, and [`BoardError::NoRuntime`] when no runtime is
    /// available for the request. Nothing changes in these cases.
    pub fn create_task(&self, draft: TaskDraft, column: &ColumnId) -> BoardResult<CreateTicket> {
        if !self.config.layout.contains(column) {
            return Err(BoardError::UnknownColumn(column.clone()));
        }
        let runtime = self.runtime()?;
        let placeholder = self.next_placeholder();
        let parent = draft.parent_id().cloned();
        let task = Task::from_draft(placeholder.clone(), draft, column.as_str());
        let payload = TaskPayload::for_task(&task);

        {
            let mut state = self.write_state();
            let inserted = match &parent {
                Some(parent_id) if parent_id.is_placeholder() => {
                    Err(BoardError::PendingCreation(parent_id.clone()))
                }
                Some(parent_id) => state
                    .index
                    .insert_subtask(parent_id, task)
                    .ok_or_else(|| BoardError::ParentNotFound(parent_id.clone())),
                None => state
                    .index
                    .insert(column, None, task)
                    .ok_or_else(|| BoardError::UnknownColumn(column.clone())),
            };
            inserted?;
            state.versions.stamp(&placeholder);
        }

        let state = self.state.clone();
        let gateway = self.gateway.clone();
        let id = placeholder.clone();
        let pending = PendingSync::spawn(&runtime, async move {
            let result = gateway.create_task(&payload).await;
            let mut guard = lock(&state);
            let BoardState { index, versions } = &mut *guard;
            match result {
                Ok(record) => {
                    reconcile_created(index, versions, &id, parent.as_ref(), &record);
                    Ok(record)
                }
                Err(err) => {
                    discard_placeholder(index, &id, parent.is_some());
                    versions.forget(&id);
                    tracing::warn!(placeholder = %id, error = %err, "task creation failed, rolled back");
                    Err(err.into())
                }
            }
        });

        Ok(CreateTicket {
            placeholder,
            pending,
        })
    }
}

/// Swaps the placeholder for the stored record.
///
/// A record whose identifier is already on the board only drops the
/// placeholder. A subtask whose placeholder was lost to a reconciliation of
/// its parent is appended to the parent again.
fn reconcile_created(
    index: &mut ColumnIndex,
    versions: &mut VersionLedger,
    placeholder: &TaskId,
    parent: Option<&TaskId>,
    record: &Task,
) {
    if index.replace(placeholder, record.clone()).is_some() {
        versions.rename(placeholder, record.id());
        tracing::debug!(%placeholder, task_id = %record.id(), "task created");
        return;
    }
    versions.forget(placeholder);
    if index.entity(placeholder).is_some() {
        discard_placeholder(index, placeholder, parent.is_some());
        tracing::warn!(
            %placeholder,
            task_id = %record.id(),
            "created record already on the board, placeholder dropped"
        );
    } else if reattach_subtask(index, parent, record) {
        versions.stamp(record.id());
        tracing::debug!(%placeholder, task_id = %record.id(), "subtask reattached");
    } else {
        tracing::debug!(%placeholder, "placeholder gone before reconciliation");
    }
}

fn discard_placeholder(index: &mut ColumnIndex, id: &TaskId, is_subtask: bool) {
    if is_subtask {
        index.remove_subtask(id);
    } else {
        index.remove(id);
    }
}

/// Puts a created subtask back under its parent when the placeholder was
/// lost to a reconciliation of the parent.
fn reattach_subtask(index: &mut ColumnIndex, parent: Option<&TaskId>, record: &Task) -> bool {
    let Some(parent) = parent else {
        return false;
    };
    if index.entity(record.id()).is_some() {
        return false;
    }
    index.insert_subtask(parent, record.clone()).is_some()
}

//! Drag-driven move and reorder.

use super::{
    BoardError, BoardStore, PendingSync, SyncOutcome,
    pipeline::{log_rollback, with_retry},
    store::lock,
};
use crate::board::{
    domain::{ColumnId, TaskId},
    ports::{TaskGateway, TaskPayload},
};
use mockable::Clock;

impl<G, C> BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Moves a task to `dest_index` in `dest`, or to its end when the index
    /// is `None` or past the end.
    ///
    /// Within one column this is a reorder and the status is untouched.
    /// Across columns the status becomes the destination identifier. The
    /// move is visible as soon as this returns; the returned handle resolves
    /// once the service has stored it. If persistence fails the move is
    /// undone, unless the task changed again in the meantime.
    ///
    /// A task missing from `source`, or an unknown `dest`, yields
    /// [`SyncOutcome::Skipped`].
    pub fn move_task(
        &self,
        task_id: &TaskId,
        source: &ColumnId,
        dest: &ColumnId,
        dest_index: Option<usize>,
    ) -> PendingSync<SyncOutcome> {
        if task_id.is_placeholder() {
            return PendingSync::ready(Err(BoardError::PendingCreation(task_id.clone())));
        }
        let runtime = match self.runtime() {
            Ok(runtime) => runtime,
            Err(err) => return PendingSync::ready(Err(err)),
        };

        let (relocation, version, payload) = {
            let mut state = self.write_state();
            let Some(relocation) = state.index.relocate(task_id, source, dest, dest_index) else {
                tracing::debug!(%task_id, %source, %dest, "move skipped: task not in source column");
                return PendingSync::skipped();
            };
            let version = state.versions.stamp(task_id);
            let Some(moved) = state.index.task(task_id) else {
                return PendingSync::skipped();
            };
            (relocation, version, TaskPayload::for_task(moved))
        };

        let state = self.state.clone();
        let gateway = self.gateway.clone();
        let retry = self.config.retry;
        let id = task_id.clone();
        let source_column = source.clone();
        let dest_column = dest.clone();
        PendingSync::spawn(&runtime, async move {
            let result = with_retry(&retry, "move_task", || gateway.update_task(&id, &payload)).await;
            let mut guard = lock(&state);
            match result {
                Ok(record) => {
                    if !guard.versions.is_current(&id, version) {
                        return Ok(SyncOutcome::Stale);
                    }
                    guard.index.replace(&id, record);
                    Ok(SyncOutcome::Persisted)
                }
                Err(err) => {
                    let current = guard.versions.is_current(&id, version);
                    if current {
                        guard
                            .index
                            .relocate(&id, &dest_column, &source_column, Some(relocation.from_index));
                        guard
                            .index
                            .update(&id, |task| task.set_status(relocation.previous_status));
                        guard.versions.stamp(&id);
                    }
                    log_rollback("move_task", id.as_str(), &err, current);
                    Err(err.into())
                }
            }
        })
    }
}

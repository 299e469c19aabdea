//! Bulk hydration and point refresh from the persistence service.

use super::{
    BoardError, BoardResult, BoardStore, SyncOutcome, index::ColumnIndex, pipeline::with_retry,
};
use crate::board::{
    domain::{Task, TaskId},
    ports::TaskGateway,
};
use mockable::Clock;

impl<G, C> BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Replaces the whole board with the service's task list.
    ///
    /// Each record goes to the column matching its normalized status, or to
    /// the layout's default column when none matches, in arrival order. The
    /// first record wins when an identifier repeats. Version stamps are
    /// discarded, so responses to calls made before hydration are treated
    /// as stale. Returns the number of top-level tasks placed.
    ///
    /// # Errors
    ///
    /// Returns the gateway error after emptying every column.
    pub async fn fetch_and_set_tasks(&self) -> BoardResult<usize> {
        let fetched =
            with_retry(&self.config.retry, "fetch_and_set_tasks", || self.gateway.get_all_tasks())
                .await;
        let records = match fetched {
            Ok(records) => records,
            Err(err) => {
                self.write_state().reset();
                tracing::warn!(error = %err, "hydration failed, board cleared");
                return Err(err.into());
            }
        };

        let index = self.build_index(records);
        let placed = index.sequences().iter().map(|column| column.tasks().len()).sum();
        let mut state = self.write_state();
        state.index = index;
        state.versions.clear();
        tracing::debug!(tasks = placed, "board hydrated");
        Ok(placed)
    }

    /// Fetches one task or subtask and replaces the local copy in place.
    ///
    /// Yields [`SyncOutcome::Skipped`] when the entity is not on the board,
    /// and [`SyncOutcome::Stale`] when it changed while the lookup was in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PendingCreation`] for placeholders, and the
    /// gateway error otherwise; the local copy is left untouched.
    pub async fn refresh_task(&self, id: &TaskId) -> BoardResult<SyncOutcome> {
        if id.is_placeholder() {
            return Err(BoardError::PendingCreation(id.clone()));
        }
        let (kind, version) = {
            let state = self.read_state();
            let Some(entity) = state.index.entity(id) else {
                tracing::debug!(task_id = %id, "refresh skipped: entity not found");
                return Ok(SyncOutcome::Skipped);
            };
            (entity.kind(), state.versions.current(id))
        };

        let record = with_retry(&self.config.retry, "refresh_task", || {
            self.gateway.get_task_by_id(id, kind)
        })
        .await?;

        let mut state = self.write_state();
        if state.versions.current(id) != version {
            tracing::debug!(task_id = %id, "discarding stale refresh");
            return Ok(SyncOutcome::Stale);
        }
        if state.index.replace(id, record).is_none() {
            return Ok(SyncOutcome::Skipped);
        }
        state.versions.stamp(id);
        Ok(SyncOutcome::Persisted)
    }

    fn build_index(&self, records: Vec<Task>) -> ColumnIndex {
        let layout = &self.config.layout;
        let mut index = ColumnIndex::new(layout.clone());
        for record in records {
            let column = layout.resolve_status(record.status());
            let id = record.id().clone();
            if index.insert(&column, None, record).is_none() {
                tracing::debug!(task_id = %id, "duplicate record dropped during hydration");
            }
        }
        index
    }
}

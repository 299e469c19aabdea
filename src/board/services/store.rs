//! The client-side task state container.

use super::{BoardError, BoardResult, BoardSnapshot, StoreConfig, state::BoardState};
use crate::board::{
    domain::{BoardLayout, Column, ColumnId, Comment, Task, TaskId},
    ports::TaskGateway,
};
use mockable::Clock;
use std::sync::{
    Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    atomic::{AtomicU64, Ordering},
};
use tokio::runtime::Handle;

/// Authoritative in-memory mirror of the board.
///
/// Readers get cloned views. Every write goes through the operations on
/// this type, which commit locally first and then persist through the
/// [`TaskGateway`] in a background task. Cloning the store shares its state.
///
/// Background tasks run on the caller's Tokio runtime. Callers outside a
/// runtime supply one with [`BoardStore::with_runtime`]; without either,
/// mutating operations fail with [`BoardError::NoRuntime`] before touching
/// the board.
pub struct BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    pub(super) state: Arc<RwLock<BoardState>>,
    pub(super) gateway: Arc<G>,
    pub(super) clock: Arc<C>,
    pub(super) config: Arc<StoreConfig>,
    placeholder_sequence: Arc<AtomicU64>,
    runtime: Option<Handle>,
}

impl<G, C> Clone for BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            gateway: Arc::clone(&self.gateway),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
            placeholder_sequence: Arc::clone(&self.placeholder_sequence),
            runtime: self.runtime.clone(),
        }
    }
}

impl<G, C> BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates an empty board with the default configuration.
    #[must_use]
    pub fn new(gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self::with_config(gateway, clock, StoreConfig::default())
    }

    /// Creates an empty board with the given configuration.
    #[must_use]
    pub fn with_config(gateway: Arc<G>, clock: Arc<C>, config: StoreConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(BoardState::new(config.layout.clone()))),
            gateway,
            clock,
            config: Arc::new(config),
            placeholder_sequence: Arc::new(AtomicU64::new(0)),
            runtime: None,
        }
    }

    /// Runs background persistence on `runtime` when called outside a
    /// Tokio runtime.
    #[must_use]
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the board layout.
    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.config.layout
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.config.layout.columns()
    }

    /// Returns the ordered tasks of a column; empty for unknown columns.
    #[must_use]
    pub fn tasks(&self, column: &ColumnId) -> Vec<Task> {
        self.read_state()
            .index
            .tasks(column)
            .map(<[Task]>::to_vec)
            .unwrap_or_default()
    }

    /// Returns a top-level task.
    #[must_use]
    pub fn get_task_by_id(&self, id: &TaskId) -> Option<Task> {
        self.read_state().index.task(id).cloned()
    }

    /// Returns a task or subtask.
    #[must_use]
    pub fn entity(&self, id: &TaskId) -> Option<Task> {
        self.read_state().index.entity(id).cloned()
    }

    /// Returns the column holding a top-level task.
    #[must_use]
    pub fn locate_column(&self, id: &TaskId) -> Option<ColumnId> {
        self.read_state().index.locate_column(id).cloned()
    }

    /// Returns the comments of a task or subtask; empty when unknown.
    #[must_use]
    pub fn comments(&self, id: &TaskId) -> Vec<Comment> {
        self.read_state()
            .index
            .entity(id)
            .map(|entity| entity.comments().to_vec())
            .unwrap_or_default()
    }

    /// Returns a detached copy of every column.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(self.read_state().index.sequences().to_vec())
    }

    pub(super) fn read_state(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn write_state(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Picks the runtime for background persistence: the caller's, or the
    /// configured fallback.
    pub(super) fn runtime(&self) -> BoardResult<Handle> {
        Handle::try_current()
            .ok()
            .or_else(|| self.runtime.clone())
            .ok_or(BoardError::NoRuntime)
    }

    /// Builds a placeholder identifier that is unique within this store.
    pub(super) fn next_placeholder(&self) -> TaskId {
        let sequence = self.placeholder_sequence.fetch_add(1, Ordering::Relaxed);
        TaskId::placeholder(self.clock.utc().timestamp_millis(), sequence)
    }
}

/// Locks shared state from inside a background task.
pub(super) fn lock(state: &RwLock<BoardState>) -> RwLockWriteGuard<'_, BoardState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

//! Real-time patches from other clients and outbound timer control.

use super::{BoardResult, BoardStore};
use crate::board::{
    domain::{TaskId, TaskPatch, TimerPatch},
    ports::{PushEvent, TaskGateway, TimerAction, TimerChannel, TimerCommand},
};
use mockable::Clock;
use std::sync::Arc;

impl<G, C> BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Applies a decoded push event. Returns `true` when an entity changed.
    pub fn apply_push(&self, event: &PushEvent) -> bool {
        match event {
            PushEvent::TaskPatch(patch) => self.apply_task_patch(patch),
            PushEvent::TimerPatch(patch) => self.apply_timer_patch(patch),
        }
    }

    /// Merges a task patch into the task or subtask it names.
    ///
    /// The entity stays where it is even when the patch carries a new
    /// status. Patches for unknown identifiers are ignored.
    pub fn apply_task_patch(&self, patch: &TaskPatch) -> bool {
        let mut state = self.write_state();
        if state
            .index
            .update(&patch.id, |entity| patch.apply_to(entity))
            .is_none()
        {
            tracing::debug!(task_id = %patch.id, "task patch ignored: entity not found");
            return false;
        }
        state.versions.stamp(&patch.id);
        true
    }

    /// Merges a timer patch into the task or subtask it names.
    pub fn apply_timer_patch(&self, patch: &TimerPatch) -> bool {
        let mut state = self.write_state();
        if state
            .index
            .update(&patch.task_id, |entity| entity.set_timer(patch.timer()))
            .is_none()
        {
            tracing::debug!(task_id = %patch.task_id, "timer patch ignored: entity not found");
            return false;
        }
        state.versions.stamp(&patch.task_id);
        true
    }
}

/// Sends timer actions over a [`TimerChannel`].
///
/// The board itself is not touched; the resulting state arrives later as a
/// timer patch.
#[derive(Debug)]
pub struct TimerRelay<T: TimerChannel> {
    channel: Arc<T>,
}

impl<T: TimerChannel> Clone for TimerRelay<T> {
    fn clone(&self) -> Self {
        Self {
            channel: Arc::clone(&self.channel),
        }
    }
}

impl<T: TimerChannel> TimerRelay<T> {
    /// Creates a relay over the given channel.
    #[must_use]
    pub const fn new(channel: Arc<T>) -> Self {
        Self { channel }
    }

    /// Starts or resumes a timer.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::TimerChannel`] when the command cannot
    /// be sent.
    pub async fn start(&self, task_id: &TaskId, time_spent: u64) -> BoardResult<TimerCommand> {
        self.send(task_id, TimerAction::Start, time_spent).await
    }

    /// Pauses a timer, keeping the accumulated time.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::TimerChannel`] when the command cannot
    /// be sent.
    pub async fn pause(&self, task_id: &TaskId, time_spent: u64) -> BoardResult<TimerCommand> {
        self.send(task_id, TimerAction::Pause, time_spent).await
    }

    /// Stops a timer and resets the accumulated time to zero.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::TimerChannel`] when the command cannot
    /// be sent.
    pub async fn stop(&self, task_id: &TaskId) -> BoardResult<TimerCommand> {
        self.send(task_id, TimerAction::Stop, 0).await
    }

    async fn send(
        &self,
        task_id: &TaskId,
        action: TimerAction,
        time_spent: u64,
    ) -> BoardResult<TimerCommand> {
        let command = TimerCommand {
            task_id: task_id.clone(),
            action,
            time_spent,
        };
        self.channel.emit(&command).await?;
        tracing::debug!(task_id = %task_id, ?action, "timer command sent");
        Ok(command)
    }
}

//! Push channel contracts: inbound patches and outbound timer actions.

use crate::board::domain::{TaskId, TaskPatch, TimerPatch};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Event name carrying a task patch.
pub const TASK_UPDATE_EVENT: &str = "task:update";

/// Event name carrying a timer patch.
pub const TIMER_UPDATE_EVENT: &str = "timer:update";

/// Event name used for outbound timer actions.
pub const TIMER_ACTION_EVENT: &str = "timer:action";

/// A message delivered by the push channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    /// Full or partial task record changed remotely.
    TaskPatch(TaskPatch),
    /// Timer state changed remotely.
    TimerPatch(TimerPatch),
}

impl PushEvent {
    /// Decodes a raw channel message from its event name and JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`PushDecodeError::UnknownEvent`] for unsupported event names
    /// and [`PushDecodeError::Payload`] for malformed bodies.
    pub fn decode(event: &str, payload: &str) -> Result<Self, PushDecodeError> {
        match event {
            TASK_UPDATE_EVENT => Ok(Self::TaskPatch(serde_json::from_str(payload)?)),
            TIMER_UPDATE_EVENT => Ok(Self::TimerPatch(serde_json::from_str(payload)?)),
            other => Err(PushDecodeError::UnknownEvent(other.to_owned())),
        }
    }

    /// Returns the identifier of the entity the event targets.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        match self {
            Self::TaskPatch(patch) => &patch.id,
            Self::TimerPatch(patch) => &patch.task_id,
        }
    }
}

/// Errors raised while decoding push messages.
#[derive(Debug, Error)]
pub enum PushDecodeError {
    /// The event name is not handled.
    #[error("unknown push event: {0}")]
    UnknownEvent(String),

    /// The body does not match the event schema.
    #[error("malformed push payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Timer control requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    /// Start or resume the timer.
    Start,
    /// Pause the timer, keeping the accumulated time.
    Pause,
    /// Stop the timer and reset the accumulated time.
    Stop,
}

/// Outbound timer message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerCommand {
    /// Task whose timer is controlled.
    pub task_id: TaskId,
    /// Requested action.
    pub action: TimerAction,
    /// Accumulated seconds as seen by the client.
    pub time_spent: u64,
}

/// Outbound half of the push channel.
#[async_trait]
pub trait TimerChannel: Send + Sync {
    /// Sends a timer command to the timer service.
    ///
    /// # Errors
    ///
    /// Returns [`TimerChannelError`] when the channel is disconnected.
    async fn emit(&self, command: &TimerCommand) -> Result<(), TimerChannelError>;
}

/// Errors returned by timer channel implementations.
#[derive(Debug, Clone, Error)]
pub enum TimerChannelError {
    /// The channel is not connected.
    #[error("timer channel disconnected")]
    Disconnected,

    /// The underlying transport failed.
    #[error("timer channel transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

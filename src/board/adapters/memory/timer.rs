//! Recording timer channel for tests and offline use.

use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};

use crate::board::ports::{TIMER_ACTION_EVENT, TimerChannel, TimerChannelError, TimerCommand};

/// Timer channel that keeps every emitted command in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingTimerChannel {
    state: Arc<RwLock<RecordedTimerState>>,
}

#[derive(Debug, Default)]
struct RecordedTimerState {
    emitted: Vec<(&'static str, TimerCommand)>,
    disconnected: bool,
}

impl RecordingTimerChannel {
    /// Creates a connected channel with no recorded commands.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates losing or regaining the connection.
    pub fn set_disconnected(&self, disconnected: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .disconnected = disconnected;
    }

    /// Returns the emitted commands with their event names, oldest first.
    #[must_use]
    pub fn emitted(&self) -> Vec<(&'static str, TimerCommand)> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .emitted
            .clone()
    }
}

#[async_trait]
impl TimerChannel for RecordingTimerChannel {
    async fn emit(&self, command: &TimerCommand) -> Result<(), TimerChannelError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.disconnected {
            return Err(TimerChannelError::Disconnected);
        }
        state.emitted.push((TIMER_ACTION_EVENT, command.clone()));
        Ok(())
    }
}

//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;
pub mod push;

pub use gateway::{GatewayError, GatewayResult, TaskGateway, TaskPayload};
pub use push::{
    PushDecodeError, PushEvent, TASK_UPDATE_EVENT, TIMER_ACTION_EVENT, TIMER_UPDATE_EVENT,
    TimerAction, TimerChannel, TimerChannelError, TimerCommand,
};

#[cfg(test)]
pub use gateway::MockTaskGateway;

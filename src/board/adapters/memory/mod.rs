//! In-memory adapters for the board ports.

mod gateway;
mod timer;

pub use gateway::InMemoryTaskGateway;
pub use timer::RecordingTimerChannel;

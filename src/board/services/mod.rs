//! Application services for the board: the store and its operations.
//!
//! [`BoardStore`] owns the Column Index and the version ledger behind one
//! lock. Each operation commits its change locally, then persists it in a
//! background task and reconciles the answer. The operations are split by
//! concern across the private submodules; they all extend the same store.

mod comments;
mod config;
mod creation;
mod error;
mod fields;
mod history;
mod hydration;
mod index;
pub mod locator;
mod moves;
mod pipeline;
mod realtime;
mod snapshot;
mod state;
mod store;
mod versions;

pub use config::{RetryPolicy, StoreConfig};
pub use creation::CreateTicket;
pub use error::{BoardError, BoardResult};
pub use history::{HistoryFilter, completed_tasks};
pub use index::{ColumnIndex, Placement, Relocation, Removed};
pub use locator::{ColumnTasks, SubtaskMatch};
pub use pipeline::{PendingSync, SyncOutcome};
pub use realtime::TimerRelay;
pub use snapshot::BoardSnapshot;
pub use state::BoardState;
pub use store::BoardStore;
pub use versions::{Version, VersionLedger};

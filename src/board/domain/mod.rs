//! Domain model for the task board.
//!
//! Tasks, subtasks, comments and columns are plain values here; placement,
//! persistence and synchronization live outside the domain boundary.

mod column;
mod comment;
mod error;
mod ids;
mod patch;
mod task;

pub use column::{BoardLayout, Column};
pub use comment::Comment;
pub use error::{BoardDomainError, ParsePriorityError};
pub use ids::{ColumnId, CommentId, TaskId};
pub use patch::{TaskPatch, TimerPatch};
pub use task::{Attachment, Priority, Task, TaskDraft, TaskKind, TimerState};

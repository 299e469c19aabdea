//! Detached, read-only copy of the board handed to renderers.

use super::locator::{self, ColumnTasks, SubtaskMatch};
use crate::board::domain::{ColumnId, Comment, Task, TaskId};

/// Point-in-time copy of every column.
///
/// A snapshot carries no placement table; lookups scan its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    columns: Vec<ColumnTasks>,
}

impl BoardSnapshot {
    pub(super) const fn new(columns: Vec<ColumnTasks>) -> Self {
        Self { columns }
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnTasks] {
        &self.columns
    }

    /// Returns the tasks of a column.
    #[must_use]
    pub fn tasks(&self, column: &ColumnId) -> &[Task] {
        self.columns
            .iter()
            .find(|sequence| sequence.id() == column)
            .map(ColumnTasks::tasks)
            .unwrap_or_default()
    }

    /// Returns the first top-level task with the identifier.
    #[must_use]
    pub fn get_task_by_id(&self, id: &TaskId) -> Option<&Task> {
        locator::get_task_by_id(&self.columns, id)
    }

    /// Returns the column holding a top-level task.
    #[must_use]
    pub fn locate_column(&self, id: &TaskId) -> Option<&ColumnId> {
        locator::locate_column(&self.columns, id)
    }

    /// Returns a subtask together with its parent.
    #[must_use]
    pub fn find_subtask(&self, id: &TaskId) -> Option<SubtaskMatch<'_>> {
        locator::find_subtask(&self.columns, id)
    }

    /// Returns the comments of a task or subtask.
    #[must_use]
    pub fn comments(&self, id: &TaskId) -> &[Comment] {
        locator::find_entity(&self.columns, id)
            .map(Task::comments)
            .unwrap_or_default()
    }

    /// Returns the number of top-level tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|sequence| sequence.tasks().len()).sum()
    }
}

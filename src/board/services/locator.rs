//! Linear-scan lookups over column sequences.
//!
//! These functions hold no index: they walk every column, and for subtasks
//! every parent, to find an entity. Detached [`super::BoardSnapshot`]s rely
//! on them directly; the live [`super::ColumnIndex`] uses them within a
//! single column once its placement table has named that column.

use crate::board::domain::{Column, ColumnId, Task, TaskId};

/// One column together with its ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTasks {
    column: Column,
    tasks: Vec<Task>,
}

impl ColumnTasks {
    /// Creates an empty sequence for a column.
    #[must_use]
    pub const fn empty(column: Column) -> Self {
        Self {
            column,
            tasks: Vec::new(),
        }
    }

    /// Returns the column.
    #[must_use]
    pub const fn column(&self) -> &Column {
        &self.column
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        self.column.id()
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(super) const fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }
}

/// A subtask found inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtaskMatch<'a> {
    /// Column holding the parent.
    pub column: &'a ColumnId,
    /// Owning task.
    pub parent: &'a Task,
    /// The subtask itself.
    pub subtask: &'a Task,
}

/// Returns the first top-level task with the identifier, scanning columns in
/// order.
#[must_use]
pub fn get_task_by_id<'a>(columns: &'a [ColumnTasks], id: &TaskId) -> Option<&'a Task> {
    columns
        .iter()
        .flat_map(|sequence| sequence.tasks.iter())
        .find(|task| task.id() == id)
}

/// Returns the column holding a top-level task.
#[must_use]
pub fn locate_column<'a>(columns: &'a [ColumnTasks], id: &TaskId) -> Option<&'a ColumnId> {
    columns
        .iter()
        .find(|sequence| sequence.tasks.iter().any(|task| task.id() == id))
        .map(ColumnTasks::id)
}

/// Returns the position and task for an identifier within one column.
#[must_use]
pub fn find_in_column<'a>(
    columns: &'a [ColumnTasks],
    column: &ColumnId,
    id: &TaskId,
) -> Option<(usize, &'a Task)> {
    columns
        .iter()
        .find(|sequence| sequence.id() == column)?
        .tasks
        .iter()
        .enumerate()
        .find(|(_, task)| task.id() == id)
}

/// Searches every task's subtask list for the identifier.
#[must_use]
pub fn find_subtask<'a>(columns: &'a [ColumnTasks], id: &TaskId) -> Option<SubtaskMatch<'a>> {
    columns.iter().find_map(|sequence| {
        sequence.tasks.iter().find_map(|parent| {
            parent.subtask(id).map(|subtask| SubtaskMatch {
                column: sequence.id(),
                parent,
                subtask,
            })
        })
    })
}

/// Returns a task or, failing that, a subtask with the identifier.
#[must_use]
pub fn find_entity<'a>(columns: &'a [ColumnTasks], id: &TaskId) -> Option<&'a Task> {
    get_task_by_id(columns, id).or_else(|| find_subtask(columns, id).map(|found| found.subtask))
}

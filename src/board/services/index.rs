//! Column Index: ordered task sequences plus a placement side table.

use super::locator::{self, ColumnTasks};
use crate::board::domain::{BoardLayout, ColumnId, Task, TaskId};
use std::collections::HashMap;

/// Where an entity currently lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A top-level task in a column sequence.
    Column(ColumnId),
    /// A subtask inside a top-level task.
    Subtask {
        /// Owning task.
        parent: TaskId,
        /// Column holding the owning task.
        column: ColumnId,
    },
}

impl Placement {
    /// Returns the column that holds the entity or its parent.
    #[must_use]
    pub const fn column(&self) -> &ColumnId {
        match self {
            Self::Column(column) | Self::Subtask { column, .. } => column,
        }
    }
}

/// A top-level task taken out of its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    /// Column the task was removed from.
    pub column: ColumnId,
    /// Position it occupied.
    pub index: usize,
    /// The task.
    pub task: Task,
}

/// Record of a move, sufficient to undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Position in the source column before the move.
    pub from_index: usize,
    /// Position in the destination column after the move.
    pub to_index: usize,
    /// Status before the move.
    pub previous_status: String,
}

/// Mapping from column to ordered task sequence.
///
/// Every top-level task appears in exactly one sequence and every
/// identifier at most once on the board. The placement table mirrors the
/// sequences for tasks and their subtasks and is updated by every mutating
/// method, so lookups never scan other columns. Subtasks entering the index
/// are pointed at the task that holds them.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    layout: BoardLayout,
    columns: Vec<ColumnTasks>,
    placements: HashMap<TaskId, Placement>,
}

impl ColumnIndex {
    /// Creates an index with an empty sequence for every configured column.
    #[must_use]
    pub fn new(layout: BoardLayout) -> Self {
        let columns = layout
            .columns()
            .iter()
            .cloned()
            .map(ColumnTasks::empty)
            .collect();
        Self {
            layout,
            columns,
            placements: HashMap::new(),
        }
    }

    /// Returns the layout the index was built from.
    #[must_use]
    pub const fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Returns all sequences in layout order.
    #[must_use]
    pub fn sequences(&self) -> &[ColumnTasks] {
        &self.columns
    }

    /// Returns the tasks of one column.
    #[must_use]
    pub fn tasks(&self, column: &ColumnId) -> Option<&[Task]> {
        self.columns
            .iter()
            .find(|sequence| sequence.id() == column)
            .map(ColumnTasks::tasks)
    }

    /// Returns where an entity lives.
    #[must_use]
    pub fn placement(&self, id: &TaskId) -> Option<&Placement> {
        self.placements.get(id)
    }

    /// Returns the column holding a top-level task.
    #[must_use]
    pub fn locate_column(&self, id: &TaskId) -> Option<&ColumnId> {
        match self.placements.get(id)? {
            Placement::Column(column) => Some(column),
            Placement::Subtask { .. } => None,
        }
    }

    /// Returns the position of a top-level task within a column.
    #[must_use]
    pub fn position(&self, column: &ColumnId, id: &TaskId) -> Option<usize> {
        locator::find_in_column(&self.columns, column, id).map(|(index, _)| index)
    }

    /// Returns a top-level task.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        let column = self.locate_column(id)?;
        locator::find_in_column(&self.columns, column, id).map(|(_, task)| task)
    }

    /// Returns a task or subtask.
    #[must_use]
    pub fn entity(&self, id: &TaskId) -> Option<&Task> {
        match self.placements.get(id)? {
            Placement::Column(_) => self.task(id),
            Placement::Subtask { parent, .. } => self.task(parent)?.subtask(id),
        }
    }

    /// Empties every sequence and the placement table.
    pub fn clear(&mut self) {
        for sequence in &mut self.columns {
            sequence.tasks_mut().clear();
        }
        self.placements.clear();
    }

    /// Inserts a top-level task at `index`, or at the end when `index` is
    /// `None` or past the end.
    ///
    /// Returns the final position, or `None` when the column is unknown or
    /// the task or one of its subtasks is already on the board.
    pub fn insert(
        &mut self,
        column: &ColumnId,
        index: Option<usize>,
        mut task: Task,
    ) -> Option<usize> {
        if self.collides(None, &task) {
            return None;
        }
        task.adopt_subtasks();
        let sequence = self.sequence_mut(column)?;
        let position = index.map_or(sequence.len(), |at| at.min(sequence.len()));
        register(&mut self.placements, column, &task);
        self.sequence_mut(column)?.insert(position, task);
        Some(position)
    }

    /// Removes a top-level task from its column.
    pub fn remove(&mut self, id: &TaskId) -> Option<Removed> {
        let column = self.locate_column(id)?.clone();
        let index = self.position(&column, id)?;
        let task = self.sequence_mut(&column)?.remove(index);
        unregister(&mut self.placements, &task);
        Some(Removed {
            column,
            index,
            task,
        })
    }

    /// Appends a subtask to a top-level task.
    ///
    /// Returns the subtask's position, or `None` when the parent is missing
    /// or the identifier is already on the board.
    pub fn insert_subtask(&mut self, parent: &TaskId, subtask: Task) -> Option<usize> {
        if self.placements.contains_key(subtask.id()) {
            return None;
        }
        let column = self.locate_column(parent)?.clone();
        let subtask_id = subtask.id().clone();
        let owner = self.task_mut(parent)?;
        owner.push_subtask(subtask);
        let position = owner.subtasks().len().saturating_sub(1);
        self.placements.insert(
            subtask_id,
            Placement::Subtask {
                parent: parent.clone(),
                column,
            },
        );
        Some(position)
    }

    /// Removes a subtask from its parent.
    pub fn remove_subtask(&mut self, id: &TaskId) -> Option<(TaskId, Task)> {
        let Some(Placement::Subtask { parent, .. }) = self.placements.get(id).cloned() else {
            return None;
        };
        let removed = self.task_mut(&parent)?.remove_subtask(id)?;
        self.placements.remove(id);
        Some((parent, removed))
    }

    /// Applies `change` to a task or subtask in place.
    ///
    /// Returns the entity before and after the change. Subtask placements
    /// are refreshed when a top-level task's subtask list changes. A change
    /// that would bring in a subtask already placed elsewhere is undone and
    /// `None` is returned.
    pub fn update<F>(&mut self, id: &TaskId, change: F) -> Option<(Task, Task)>
    where
        F: FnOnce(&mut Task),
    {
        let placement = self.placements.get(id)?.clone();
        let (before, after) = {
            let entity = self.entity_mut(id, &placement)?;
            let before = entity.clone();
            change(entity);
            entity.adopt_subtasks();
            (before, entity.clone())
        };
        if let Placement::Column(column) = &placement {
            if self.collides(Some(id), &after) {
                tracing::debug!(task_id = %id, "update rejected: subtask already on the board");
                *self.entity_mut(id, &placement)? = before;
                return None;
            }
            unregister(&mut self.placements, &before);
            register(&mut self.placements, column, &after);
        }
        Some((before, after))
    }

    /// Replaces a task or subtask in place with `replacement`, which may
    /// carry a different identifier.
    ///
    /// Placeholder subtasks of the replaced task that the replacement does
    /// not list are kept at the end of its subtask list. Returns `None`,
    /// changing nothing, when the entity is unknown or the replacement would
    /// put an identifier on the board twice.
    pub fn replace(&mut self, id: &TaskId, mut replacement: Task) -> Option<Task> {
        let placement = self.placements.get(id)?.clone();
        if self.collides(Some(id), &replacement) {
            tracing::debug!(
                task_id = %id,
                replacement = %replacement.id(),
                "replace rejected: identifier already on the board"
            );
            return None;
        }
        match placement {
            Placement::Column(column) => {
                let position = self.position(&column, id)?;
                let slot = self.sequence_mut(&column)?.get_mut(position)?;
                for pending in slot.subtasks() {
                    if pending.id().is_placeholder() && replacement.subtask(pending.id()).is_none() {
                        replacement.push_subtask(pending.clone());
                    }
                }
                replacement.adopt_subtasks();
                let previous = std::mem::replace(slot, replacement.clone());
                unregister(&mut self.placements, &previous);
                register(&mut self.placements, &column, &replacement);
                Some(previous)
            }
            Placement::Subtask { parent, column } => {
                let owner = self.task_mut(&parent)?;
                let position = owner.subtask_position(id)?;
                let mut subtasks = owner.subtasks().to_vec();
                let slot = subtasks.get_mut(position)?;
                let previous = std::mem::replace(slot, replacement.clone());
                owner.set_subtasks(subtasks);
                self.placements.remove(id);
                self.placements.insert(
                    replacement.id().clone(),
                    Placement::Subtask { parent, column },
                );
                Some(previous)
            }
        }
    }

    /// Moves a top-level task between or within columns.
    ///
    /// Crossing columns rewrites the task's status to the destination
    /// identifier. Returns `None`, changing nothing, when the task is not in
    /// `source` or `dest` is unknown.
    pub fn relocate(
        &mut self,
        id: &TaskId,
        source: &ColumnId,
        dest: &ColumnId,
        dest_index: Option<usize>,
    ) -> Option<Relocation> {
        if !self.layout.contains(dest) {
            return None;
        }
        let from_index = self.position(source, id)?;
        let mut task = self.sequence_mut(source)?.remove(from_index);
        let previous_status = task.status().to_owned();
        if source != dest {
            task.set_status(dest.as_str());
        }
        unregister(&mut self.placements, &task);
        register(&mut self.placements, dest, &task);

        let sequence = self.sequence_mut(dest)?;
        let to_index = dest_index.map_or(sequence.len(), |at| at.min(sequence.len()));
        sequence.insert(to_index, task);
        Some(Relocation {
            from_index,
            to_index,
            previous_status,
        })
    }

    fn sequence_mut(&mut self, column: &ColumnId) -> Option<&mut Vec<Task>> {
        self.columns
            .iter_mut()
            .find(|sequence| sequence.id() == column)
            .map(ColumnTasks::tasks_mut)
    }

    fn entity_mut(&mut self, id: &TaskId, placement: &Placement) -> Option<&mut Task> {
        match placement {
            Placement::Column(_) => self.task_mut(id),
            Placement::Subtask { parent, .. } => self.task_mut(parent)?.subtask_mut(id),
        }
    }

    /// Returns `true` when `task` or one of its subtasks is placed anywhere
    /// other than the slot of `owner`.
    fn collides(&self, owner: Option<&TaskId>, task: &Task) -> bool {
        let taken = match self.placements.get(task.id()) {
            None => false,
            Some(_) => Some(task.id()) != owner,
        };
        taken
            || task
                .subtasks()
                .iter()
                .any(|subtask| match self.placements.get(subtask.id()) {
                    None => false,
                    Some(Placement::Subtask { parent, .. }) => Some(parent) != owner,
                    Some(Placement::Column(_)) => true,
                })
    }

    fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        let column = self.locate_column(id)?.clone();
        self.sequence_mut(&column)?
            .iter_mut()
            .find(|task| task.id() == id)
    }
}

fn register(placements: &mut HashMap<TaskId, Placement>, column: &ColumnId, task: &Task) {
    placements.insert(task.id().clone(), Placement::Column(column.clone()));
    for subtask in task.subtasks() {
        placements.insert(
            subtask.id().clone(),
            Placement::Subtask {
                parent: task.id().clone(),
                column: column.clone(),
            },
        );
    }
}

fn unregister(placements: &mut HashMap<TaskId, Placement>, task: &Task) {
    placements.remove(task.id());
    for subtask in task.subtasks() {
        placements.remove(subtask.id());
    }
}

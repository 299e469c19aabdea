//! Workflow columns and the fixed board layout.

use super::{BoardDomainError, ColumnId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named workflow stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
}

impl Column {
    /// Creates a column from an identifier and display title.
    #[must_use]
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Ordered, statically configured set of columns.
///
/// The layout also names the fallback column used when a record's status
/// matches none of the configured identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    columns: Vec<Column>,
    default_column: ColumnId,
}

impl BoardLayout {
    /// Creates a validated layout.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyLayout`] without columns,
    /// [`BoardDomainError::DuplicateColumn`] when an identifier repeats, and
    /// [`BoardDomainError::UnknownDefaultColumn`] when the fallback column is
    /// not declared.
    pub fn new(columns: Vec<Column>, default_column: ColumnId) -> Result<Self, BoardDomainError> {
        if columns.is_empty() {
            return Err(BoardDomainError::EmptyLayout);
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.id()) {
                return Err(BoardDomainError::DuplicateColumn(column.id().clone()));
            }
        }
        if !seen.contains(&default_column) {
            return Err(BoardDomainError::UnknownDefaultColumn(default_column));
        }
        Ok(Self {
            columns,
            default_column,
        })
    }

    /// The five-stage layout used by the board UI, falling back to
    /// `backlog`.
    #[must_use]
    pub fn standard() -> Self {
        let columns = [
            ("backlog", "Backlog"),
            ("todo", "To Do"),
            ("inprogress", "In Progress"),
            ("review", "Review"),
            ("completed", "Completed"),
        ]
        .into_iter()
        .map(|(id, title)| Column::new(ColumnId::from_normalized(id), title))
        .collect();

        Self {
            columns,
            default_column: ColumnId::from_normalized("backlog"),
        }
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the fallback column.
    #[must_use]
    pub const fn default_column(&self) -> &ColumnId {
        &self.default_column
    }

    /// Returns `true` when the layout declares the column.
    #[must_use]
    pub fn contains(&self, id: &ColumnId) -> bool {
        self.columns.iter().any(|column| column.id() == id)
    }

    /// Maps a raw status string onto a configured column.
    ///
    /// The status is normalized first; unmatched or empty values resolve to
    /// the default column.
    #[must_use]
    pub fn resolve_status(&self, status: &str) -> ColumnId {
        let normalized = ColumnId::normalize(status);
        self.columns
            .iter()
            .map(Column::id)
            .find(|id| id.as_str() == normalized)
            .unwrap_or(&self.default_column)
            .clone()
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::standard()
    }
}

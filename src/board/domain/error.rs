//! Error types for board domain validation and parsing.

use super::ColumnId;
use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The comment body is empty after trimming.
    #[error("comment body must not be empty")]
    EmptyComment,

    /// A column identifier normalized to an empty string.
    #[error("column identifier must not be empty")]
    EmptyColumnId,

    /// A board layout was declared without columns.
    #[error("board layout must declare at least one column")]
    EmptyLayout,

    /// The same column identifier appears twice in a layout.
    #[error("duplicate column in layout: {0}")]
    DuplicateColumn(ColumnId),

    /// The fallback column is not part of the layout.
    #[error("default column {0} is not part of the layout")]
    UnknownDefaultColumn(ColumnId),
}

/// Error returned while parsing a task priority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

//! Identifier types for the board domain.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix reserved for locally generated placeholder identifiers.
const PLACEHOLDER_PREFIX: &str = "temp-";

/// Identifier of a task or subtask.
///
/// Persisted entities carry the identifier assigned by the remote service.
/// Entities awaiting their first round-trip carry a placeholder built by
/// [`TaskId::placeholder`], which never collides with server identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wraps an identifier issued by the persistence service.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Builds a time-based placeholder identifier.
    ///
    /// `sequence` disambiguates placeholders created within the same
    /// millisecond.
    #[must_use]
    pub fn placeholder(epoch_millis: i64, sequence: u64) -> Self {
        Self(format!("{PLACEHOLDER_PREFIX}{epoch_millis}-{sequence}"))
    }

    /// Returns `true` when the identifier has not been issued by the server.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.0.starts_with(PLACEHOLDER_PREFIX)
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned comment identifier.
///
/// There is no client-side constructor for fresh comments: a comment only
/// gains an identifier after a round-trip through persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Wraps an identifier issued by the persistence service.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized column identifier.
///
/// Normalization lower-cases the value and strips all whitespace so that
/// status strings such as `"In Progress"` map onto `inprogress`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Creates a validated, normalized column identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnId`] when nothing is left
    /// after normalization.
    pub fn new(value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        let normalized = Self::normalize(value.as_ref());
        if normalized.is_empty() {
            return Err(BoardDomainError::EmptyColumnId);
        }
        Ok(Self(normalized))
    }

    /// Wraps a value that is already known to be normalized.
    pub(super) fn from_normalized(value: &str) -> Self {
        Self(value.to_owned())
    }

    /// Normalizes a raw status or column string.
    #[must_use]
    pub fn normalize(raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ColumnId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

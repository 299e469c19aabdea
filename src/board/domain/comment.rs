//! Threaded comments attached to tasks and subtasks.

use super::CommentId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A markdown comment on a task or subtask.
///
/// Comments created locally carry no identifier until the persistence
/// service has stored them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<CommentId>,
    #[serde(alias = "text")]
    body: String,
    #[serde(default)]
    author: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    edited: bool,
}

impl Comment {
    /// Creates an unsaved comment stamped with the current time.
    #[must_use]
    pub fn draft(body: impl Into<String>, author: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: None,
            body: body.into(),
            author: author.into(),
            created_at: clock.utc(),
            edited: false,
        }
    }

    /// Returns a copy of this comment carrying a server identifier.
    #[must_use]
    pub fn with_id(mut self, id: CommentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the server identifier, if the comment has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<&CommentId> {
        self.id.as_ref()
    }

    /// Returns the markdown body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the author label.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` once the body has been changed after creation.
    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.edited
    }

    /// Replaces the body and flags the comment as edited.
    pub fn edit(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.edited = true;
    }
}

//! Partial updates pushed by the remote side.

use super::{Attachment, Comment, Priority, Task, TaskId, TimerState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A full or partial task record pushed by another client.
///
/// Absent fields leave the local value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// Identifier of the patched task or subtask.
    #[serde(alias = "_id")]
    pub id: TaskId,
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// New estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New raw status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New attachment list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// New subtask list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Task>>,
    /// New comment list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    /// New tag list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// New timer running flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_running: Option<bool>,
    /// New accumulated time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u64>,
    /// New server update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskPatch {
    /// Creates an empty patch for the given identifier.
    #[must_use]
    pub fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            priority: None,
            estimate: None,
            description: None,
            status: None,
            attachments: None,
            subtasks: None,
            comments: None,
            tags: None,
            is_running: None,
            time_spent: None,
            updated_at: None,
        }
    }

    /// Merges the present fields into `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.set_title(title.clone());
        }
        if let Some(priority) = self.priority {
            task.set_priority(priority);
        }
        if let Some(estimate) = &self.estimate {
            task.set_estimate(estimate.clone());
        }
        if let Some(description) = &self.description {
            task.set_description(description.clone());
        }
        if let Some(status) = &self.status {
            task.set_status(status.clone());
        }
        if let Some(attachments) = &self.attachments {
            task.set_attachments(attachments.clone());
        }
        if let Some(subtasks) = &self.subtasks {
            task.set_subtasks(subtasks.clone());
        }
        if let Some(comments) = &self.comments {
            task.set_comments(comments.clone());
        }
        if let Some(tags) = &self.tags {
            task.set_tags(tags.clone());
        }
        let timer = task.timer();
        match (self.is_running, self.time_spent) {
            (None, None) => {}
            (running, spent) => task.set_timer(TimerState {
                is_running: running
                    .or(timer.map(|t| t.is_running))
                    .unwrap_or_default(),
                time_spent: spent.or(timer.map(|t| t.time_spent)).unwrap_or_default(),
            }),
        }
        if self.updated_at.is_some() {
            task.set_timestamps(task.created_at(), self.updated_at, task.completed_at());
        }
    }
}

/// Timer state pushed by the timer service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerPatch {
    /// Task whose timer changed.
    pub task_id: TaskId,
    /// Whether the timer is running.
    pub is_running: bool,
    /// Accumulated time in seconds.
    pub time_spent: u64,
}

impl TimerPatch {
    /// Returns the timer fields carried by the patch.
    #[must_use]
    pub const fn timer(&self) -> TimerState {
        TimerState {
            is_running: self.is_running,
            time_spent: self.time_spent,
        }
    }
}

//! Task entity, subtasks and their scalar value types.

use super::{BoardDomainError, Comment, ParsePriorityError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Urgent work.
    High,
    /// Normal work.
    #[default]
    Medium,
    /// Work that can wait.
    Low,
}

impl Priority {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminator telling the persistence service which collection a record
/// belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// A top-level task with a column placement.
    Task,
    /// A child of a task.
    Subtask,
}

impl TaskKind {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Subtask => "subtask",
        }
    }
}

/// Opaque file descriptor attached to a task.
///
/// `content` holds bytes selected locally that have not been uploaded yet;
/// it never travels in JSON and is only read by upload-capable gateways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    name: String,
    #[serde(skip)]
    content: Option<Vec<u8>>,
    #[serde(default, alias = "url", skip_serializing_if = "Option::is_none")]
    preview_uri: Option<String>,
}

impl Attachment {
    /// Creates a descriptor with only a file name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: None,
            preview_uri: None,
        }
    }

    /// Attaches local file bytes awaiting upload.
    #[must_use]
    pub fn with_content(mut self, content: Vec<u8>) -> Self {
        self.content = Some(content);
        self
    }

    /// Sets the preview URI.
    #[must_use]
    pub fn with_preview_uri(mut self, uri: impl Into<String>) -> Self {
        self.preview_uri = Some(uri.into());
        self
    }

    /// Returns the file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns local bytes awaiting upload, if any.
    #[must_use]
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// Returns the preview URI, if any.
    #[must_use]
    pub fn preview_uri(&self) -> Option<&str> {
        self.preview_uri.as_deref()
    }
}

/// Work timer fields reported by the timer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    /// Whether the timer is currently running.
    pub is_running: bool,
    /// Accumulated time in seconds.
    pub time_spent: u64,
}

/// Validated input for a new task or subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    priority: Priority,
    estimate: String,
    description: String,
    tags: Vec<String>,
    attachments: Vec<Attachment>,
    parent_id: Option<TaskId>,
}

impl TaskDraft {
    /// Creates a draft with a title and default fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            priority: Priority::default(),
            estimate: String::new(),
            description: String::new(),
            tags: Vec::new(),
            attachments: Vec::new(),
            parent_id: None,
        })
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the time estimate.
    #[must_use]
    pub fn with_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.estimate = estimate.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments = attachments.into_iter().collect();
        self
    }

    /// Makes this draft a subtask of `parent_id`.
    #[must_use]
    pub fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the parent reference for subtask drafts.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&TaskId> {
        self.parent_id.as_ref()
    }
}

/// A work item: either a top-level task or a subtask.
///
/// Subtasks share the task shape and additionally reference their parent.
/// They live only inside the parent's subtask list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(alias = "_id")]
    id: TaskId,
    title: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    estimate: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    subtasks: Vec<Task>,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, rename = "taskDataId", skip_serializing_if = "Option::is_none")]
    parent_id: Option<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_running: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_spent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task with the given identifier, title and status and
    /// default values elsewhere.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            priority: Priority::default(),
            estimate: String::new(),
            description: String::new(),
            status: status.into(),
            attachments: Vec::new(),
            subtasks: Vec::new(),
            comments: Vec::new(),
            tags: Vec::new(),
            parent_id: None,
            is_running: None,
            time_spent: None,
            created_at: None,
            updated_at: None,
            completed_at: None,
        }
    }

    /// Materializes a draft under the given identifier and status.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft, status: impl Into<String>) -> Self {
        let mut task = Self::new(id, draft.title, status);
        task.priority = draft.priority;
        task.estimate = draft.estimate;
        task.description = draft.description;
        task.tags = draft.tags;
        task.attachments = draft.attachments;
        task.parent_id = draft.parent_id;
        task
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the free-form time estimate.
    #[must_use]
    pub fn estimate(&self) -> &str {
        &self.estimate
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the raw status string.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the subtasks.
    #[must_use]
    pub fn subtasks(&self) -> &[Self] {
        &self.subtasks
    }

    /// Returns the comments.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the parent reference for subtasks.
    #[must_use]
    pub const fn parent_id(&self) -> Option<&TaskId> {
        self.parent_id.as_ref()
    }

    /// Returns the persistence discriminator for this entity.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        if self.parent_id.is_some() {
            TaskKind::Subtask
        } else {
            TaskKind::Task
        }
    }

    /// Returns the timer fields when the timer service has reported both.
    #[must_use]
    pub fn timer(&self) -> Option<TimerState> {
        Some(TimerState {
            is_running: self.is_running?,
            time_spent: self.time_spent?,
        })
    }

    /// Returns the server creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the server update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the server completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the most relevant activity timestamp: update, then completion,
    /// then creation.
    #[must_use]
    pub fn activity_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.completed_at).or(self.created_at)
    }

    /// Returns the subtask with the given identifier.
    #[must_use]
    pub fn subtask(&self, id: &TaskId) -> Option<&Self> {
        self.subtasks.iter().find(|subtask| subtask.id() == id)
    }

    /// Returns a mutable reference to the subtask with the given identifier.
    pub fn subtask_mut(&mut self, id: &TaskId) -> Option<&mut Self> {
        self.subtasks.iter_mut().find(|subtask| subtask.id() == id)
    }

    /// Returns the position of a subtask within this task's list.
    #[must_use]
    pub fn subtask_position(&self, id: &TaskId) -> Option<usize> {
        self.subtasks.iter().position(|subtask| subtask.id() == id)
    }

    /// Sets the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Sets the priority.
    pub const fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Sets the estimate.
    pub fn set_estimate(&mut self, estimate: impl Into<String>) {
        self.estimate = estimate.into();
    }

    /// Sets the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Sets the raw status.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Replaces the attachment list.
    pub fn set_attachments(&mut self, attachments: Vec<Attachment>) {
        self.attachments = attachments;
    }

    /// Replaces the subtask list, pointing every subtask at this task.
    pub fn set_subtasks(&mut self, subtasks: Vec<Self>) {
        self.subtasks = subtasks;
        self.adopt_subtasks();
    }

    /// Points every subtask at this task.
    ///
    /// Wire records may omit the parent reference on embedded subtasks.
    pub fn adopt_subtasks(&mut self) {
        let parent = self.id.clone();
        for subtask in &mut self.subtasks {
            subtask.parent_id = Some(parent.clone());
        }
    }

    /// Replaces the comment list.
    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
    }

    /// Replaces the tag list.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    /// Sets the timer fields.
    pub const fn set_timer(&mut self, timer: TimerState) {
        self.is_running = Some(timer.is_running);
        self.time_spent = Some(timer.time_spent);
    }

    /// Appends a subtask, pointing it at this task.
    pub fn push_subtask(&mut self, mut subtask: Self) {
        subtask.parent_id = Some(self.id.clone());
        self.subtasks.push(subtask);
    }

    /// Removes and returns a subtask.
    pub fn remove_subtask(&mut self, id: &TaskId) -> Option<Self> {
        let position = self.subtask_position(id)?;
        Some(self.subtasks.remove(position))
    }

    /// Returns a mutable reference to the comment list.
    pub fn comments_mut(&mut self) -> &mut Vec<Comment> {
        &mut self.comments
    }

    /// Stamps server-side timestamps.
    pub const fn set_timestamps(
        &mut self,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
    ) {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self.completed_at = completed_at;
    }

    /// Returns a copy carrying a different identifier.
    ///
    /// Subtasks keep pointing at the new identifier.
    #[must_use]
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self.adopt_subtasks();
        self
    }
}

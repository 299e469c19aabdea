//! In-memory stand-in for the remote task service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

use crate::board::{
    domain::{Attachment, ColumnId, CommentId, Task, TaskId, TaskKind},
    ports::{GatewayError, GatewayResult, TaskGateway, TaskPayload},
};

const COMPLETED_STATUS: &str = "completed";

/// Thread-safe in-memory task service.
///
/// Behaves like the remote service: it assigns sequential identifiers,
/// stamps timestamps, assigns comment identifiers and records every call.
/// Failures can be scripted per call or switched on for all calls.
#[derive(Clone)]
pub struct InMemoryTaskGateway {
    state: Arc<RwLock<GatewayState>>,
    clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Default)]
struct GatewayState {
    tasks: Vec<Task>,
    next_id: u64,
    scripted_failures: VecDeque<GatewayError>,
    outage: Option<GatewayError>,
    create_calls: Vec<TaskPayload>,
    update_calls: Vec<(TaskId, TaskPayload)>,
}

impl GatewayState {
    fn take_failure(&mut self) -> GatewayResult<()> {
        if let Some(err) = self.scripted_failures.pop_front() {
            return Err(err);
        }
        self.outage.clone().map_or(Ok(()), Err)
    }

    fn issue_id(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId::new(self.next_id.to_string())
    }

    fn find(&self, id: &TaskId, kind: TaskKind) -> Option<&Task> {
        match kind {
            TaskKind::Task => self.tasks.iter().find(|task| task.id() == id),
            TaskKind::Subtask => self.tasks.iter().find_map(|task| task.subtask(id)),
        }
    }

    fn find_mut(&mut self, id: &TaskId, kind: TaskKind) -> Option<&mut Task> {
        match kind {
            TaskKind::Task => self.tasks.iter_mut().find(|task| task.id() == id),
            TaskKind::Subtask => self
                .tasks
                .iter_mut()
                .find_map(|task| task.subtask_mut(id)),
        }
    }

    /// Gives server identifiers to subtasks that still carry placeholders.
    fn canonicalize_subtasks(&mut self, task: &mut Task, now: DateTime<Utc>) {
        if task.subtasks().iter().all(|subtask| !subtask.id().is_placeholder()) {
            return;
        }
        let subtasks = task
            .subtasks()
            .iter()
            .cloned()
            .map(|subtask| {
                if subtask.id().is_placeholder() {
                    let mut issued = subtask.with_id(self.issue_id());
                    issued.set_timestamps(Some(now), Some(now), None);
                    issued
                } else {
                    subtask
                }
            })
            .collect();
        task.set_subtasks(subtasks);
    }
}

impl InMemoryTaskGateway {
    /// Creates an empty service using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Creates an empty service using the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Arc::new(RwLock::new(GatewayState::default())),
            clock,
        }
    }

    /// Stores records verbatim, as if created by other clients.
    ///
    /// Identifiers issued afterwards are numbered past every numeric
    /// identifier seeded here, subtasks included.
    pub fn seed(&self, tasks: impl IntoIterator<Item = Task>) {
        let mut state = self.write();
        for task in tasks {
            let highest = std::iter::once(&task)
                .chain(task.subtasks())
                .filter_map(|entity| entity.id().as_str().parse::<u64>().ok())
                .max();
            if let Some(highest) = highest {
                state.next_id = state.next_id.max(highest);
            }
            state.tasks.push(task);
        }
    }

    /// Makes the next call fail with `err`. Calls queue up in order.
    pub fn fail_next(&self, err: GatewayError) {
        self.write().scripted_failures.push_back(err);
    }

    /// Makes every call fail with `err` until cleared with `None`.
    pub fn set_outage(&self, err: Option<GatewayError>) {
        self.write().outage = err;
    }

    /// Returns the stored top-level records.
    #[must_use]
    pub fn stored_tasks(&self) -> Vec<Task> {
        self.read().tasks.clone()
    }

    /// Returns every create payload received, including failed calls.
    #[must_use]
    pub fn create_calls(&self) -> Vec<TaskPayload> {
        self.read().create_calls.clone()
    }

    /// Returns every update payload received, including failed calls.
    #[must_use]
    pub fn update_calls(&self) -> Vec<(TaskId, TaskPayload)> {
        self.read().update_calls.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, GatewayState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, GatewayState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryTaskGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Assigns identifiers to comments that have not been stored yet.
fn canonicalize_comments(task: &mut Task) {
    for comment in task.comments_mut() {
        if comment.id().is_none() {
            *comment = comment
                .clone()
                .with_id(CommentId::new(Uuid::new_v4().to_string()));
        }
    }
}

/// Strips uploaded bytes and exposes them under a preview URI.
fn canonicalize_attachments(task: &mut Task) {
    let attachments = task
        .attachments()
        .iter()
        .map(|attachment| {
            let mut stored = Attachment::new(attachment.name());
            match attachment.preview_uri() {
                Some(uri) => stored = stored.with_preview_uri(uri),
                None if attachment.content().is_some() => {
                    stored = stored.with_preview_uri(format!("/uploads/{}", attachment.name()));
                }
                None => {}
            }
            stored
        })
        .collect();
    task.set_attachments(attachments);
}

fn is_completed(task: &Task) -> bool {
    ColumnId::normalize(task.status()) == COMPLETED_STATUS
}

#[async_trait]
impl TaskGateway for InMemoryTaskGateway {
    async fn create_task(&self, payload: &TaskPayload) -> GatewayResult<Task> {
        let now = self.clock.utc();
        let mut state = self.write();
        state.create_calls.push(payload.clone());
        state.take_failure()?;

        let id = state.issue_id();
        let mut task = payload.task().clone().with_id(id);
        canonicalize_comments(&mut task);
        canonicalize_attachments(&mut task);
        state.canonicalize_subtasks(&mut task, now);
        task.set_timestamps(Some(now), Some(now), is_completed(&task).then_some(now));

        match payload.task_type() {
            TaskKind::Task => state.tasks.push(task.clone()),
            TaskKind::Subtask => {
                let parent_id = task
                    .parent_id()
                    .cloned()
                    .ok_or_else(|| GatewayError::Rejected("subtask without parent".to_owned()))?;
                let parent = state
                    .find_mut(&parent_id, TaskKind::Task)
                    .ok_or_else(|| GatewayError::NotFound(parent_id.clone()))?;
                parent.push_subtask(task.clone());
            }
        }
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, payload: &TaskPayload) -> GatewayResult<Task> {
        let now = self.clock.utc();
        let mut state = self.write();
        state.update_calls.push((id.clone(), payload.clone()));
        state.take_failure()?;

        let kind = payload.task_type();
        let previous = state
            .find(id, kind)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.clone()))?;

        let mut task = payload.task().clone().with_id(id.clone());
        canonicalize_comments(&mut task);
        canonicalize_attachments(&mut task);
        state.canonicalize_subtasks(&mut task, now);
        let completed_at = if is_completed(&task) {
            previous.completed_at().or(Some(now))
        } else {
            None
        };
        task.set_timestamps(previous.created_at(), Some(now), completed_at);

        let slot = state
            .find_mut(id, kind)
            .ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        *slot = task.clone();
        Ok(task)
    }

    async fn get_all_tasks(&self) -> GatewayResult<Vec<Task>> {
        let mut state = self.write();
        state.take_failure()?;
        Ok(state.tasks.clone())
    }

    async fn get_task_by_id(&self, id: &TaskId, kind: TaskKind) -> GatewayResult<Task> {
        let mut state = self.write();
        state.take_failure()?;
        state
            .find(id, kind)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.clone()))
    }
}

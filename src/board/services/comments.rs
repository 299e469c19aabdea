//! Comment lifecycle on tasks and subtasks.

use super::{
    BoardError, BoardStore, PendingSync, SyncOutcome,
    pipeline::{log_rollback, with_retry},
    store::lock,
};
use crate::board::{
    domain::{BoardDomainError, Comment, CommentId, TaskId},
    ports::{TaskGateway, TaskPayload},
};
use mockable::Clock;

impl<G, C> BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Appends a comment to a task or subtask.
    ///
    /// The comment appears immediately without an identifier. Once the
    /// service has stored the list, the record is fetched again and the
    /// server's list, with its comment identifiers, replaces the local one.
    /// An unknown entity yields [`SyncOutcome::Skipped`]; a blank body fails
    /// with [`BoardDomainError::EmptyComment`].
    pub fn add_comment(&self, entity_id: &TaskId, body: impl Into<String>) -> PendingSync<SyncOutcome> {
        let raw = body.into();
        if raw.trim().is_empty() {
            return PendingSync::ready(Err(BoardDomainError::EmptyComment.into()));
        }
        let comment = Comment::draft(raw, self.config.author.clone(), &*self.clock);
        self.mutate_comments(entity_id, "add_comment", true, move |comments| {
            comments.push(comment);
            true
        })
    }

    /// Replaces the body of a persisted comment and marks it edited.
    ///
    /// Only comments that carry a server identifier can be edited; unknown
    /// identifiers yield [`SyncOutcome::Skipped`].
    pub fn edit_comment(
        &self,
        entity_id: &TaskId,
        comment_id: &CommentId,
        body: impl Into<String>,
    ) -> PendingSync<SyncOutcome> {
        let raw = body.into();
        if raw.trim().is_empty() {
            return PendingSync::ready(Err(BoardDomainError::EmptyComment.into()));
        }
        let target = comment_id.clone();
        self.mutate_comments(entity_id, "edit_comment", false, move |comments| {
            comments
                .iter_mut()
                .find(|comment| comment.id() == Some(&target))
                .map(|comment| comment.edit(raw))
                .is_some()
        })
    }

    /// Removes a persisted comment.
    ///
    /// Unknown identifiers yield [`SyncOutcome::Skipped`].
    pub fn delete_comment(
        &self,
        entity_id: &TaskId,
        comment_id: &CommentId,
    ) -> PendingSync<SyncOutcome> {
        let target = comment_id.clone();
        self.mutate_comments(entity_id, "delete_comment", false, move |comments| {
            let before = comments.len();
            comments.retain(|comment| comment.id() != Some(&target));
            comments.len() != before
        })
    }

    /// Shared pipeline for comment edits.
    ///
    /// `edit` returns `false` when its target was not found. With `refetch`
    /// set, the canonical list comes from a follow-up point lookup rather
    /// than from the update response.
    fn mutate_comments<F>(
        &self,
        entity_id: &TaskId,
        operation: &'static str,
        refetch: bool,
        edit: F,
    ) -> PendingSync<SyncOutcome>
    where
        F: FnOnce(&mut Vec<Comment>) -> bool,
    {
        if entity_id.is_placeholder() {
            return PendingSync::ready(Err(BoardError::PendingCreation(entity_id.clone())));
        }
        let runtime = match self.runtime() {
            Ok(runtime) => runtime,
            Err(err) => return PendingSync::ready(Err(err)),
        };

        let (version, payload, previous) = {
            let mut state = self.write_state();
            let Some(entity) = state.index.entity(entity_id) else {
                tracing::debug!(task_id = %entity_id, operation, "comment skipped: entity not found");
                return PendingSync::skipped();
            };
            let mut comments = entity.comments().to_vec();
            let previous = comments.clone();
            if !edit(&mut comments) {
                tracing::debug!(task_id = %entity_id, operation, "comment skipped: comment not found");
                return PendingSync::skipped();
            }
            let Some((_, after)) = state
                .index
                .update(entity_id, |entity| entity.set_comments(comments))
            else {
                return PendingSync::skipped();
            };
            let version = state.versions.stamp(entity_id);
            (version, TaskPayload::for_task(&after), previous)
        };

        let state = self.state.clone();
        let gateway = self.gateway.clone();
        let retry = self.config.retry;
        let id = entity_id.clone();
        PendingSync::spawn(&runtime, async move {
            let kind = payload.task_type();
            let stored =
                with_retry(&retry, operation, || gateway.update_task(&id, &payload)).await;
            let canonical = match stored {
                Ok(record) if refetch => {
                    match with_retry(&retry, operation, || gateway.get_task_by_id(&id, kind)).await {
                        Ok(fetched) => Ok(fetched),
                        Err(err) => {
                            tracing::warn!(task_id = %id, error = %err, "refetch failed, using update response");
                            Ok(record)
                        }
                    }
                }
                other => other,
            };

            let mut guard = lock(&state);
            match canonical {
                Ok(record) => {
                    if !guard.versions.is_current(&id, version) {
                        return Ok(SyncOutcome::Stale);
                    }
                    let comments = record.comments().to_vec();
                    guard.index.update(&id, |entity| entity.set_comments(comments));
                    Ok(SyncOutcome::Persisted)
                }
                Err(err) => {
                    let current = guard.versions.is_current(&id, version);
                    if current {
                        guard.index.update(&id, |entity| entity.set_comments(previous));
                        guard.versions.stamp(&id);
                    }
                    log_rollback(operation, id.as_str(), &err, current);
                    Err(err.into())
                }
            }
        })
    }
}

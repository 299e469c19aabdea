//! Domain-focused tests for identifiers, layouts and task values.

use crate::board::{
    domain::{
        Attachment, BoardDomainError, BoardLayout, Column, ColumnId, Comment, Priority, Task,
        TaskDraft, TaskId, TaskKind, TaskPatch, TimerState,
    },
    ports::TaskPayload,
};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::rstest;

use super::support::{column, id};

#[rstest]
#[case("In Progress", "inprogress")]
#[case("  TODO ", "todo")]
#[case("Completed", "completed")]
fn column_id_normalizes_case_and_whitespace(#[case] raw: &str, #[case] expected: &str) {
    let normalized = ColumnId::new(raw).expect("valid column id");
    assert_eq!(normalized.as_str(), expected);
}

#[rstest]
fn column_id_rejects_blank_values() {
    assert_eq!(ColumnId::new(" \t "), Err(BoardDomainError::EmptyColumnId));
}

#[rstest]
fn placeholder_ids_are_distinguishable_from_server_ids() {
    let placeholder = TaskId::placeholder(1_700_000_000_000, 3);

    assert_eq!(placeholder.as_str(), "temp-1700000000000-3");
    assert!(placeholder.is_placeholder());
    assert!(!TaskId::new("64b7f0").is_placeholder());
}

#[rstest]
fn standard_layout_lists_columns_with_backlog_fallback() {
    let layout = BoardLayout::standard();
    let order: Vec<&str> = layout
        .columns()
        .iter()
        .map(|entry| entry.id().as_str())
        .collect();

    assert_eq!(
        order,
        ["backlog", "todo", "inprogress", "review", "completed"]
    );
    assert_eq!(layout.default_column(), &column("backlog"));
    assert_eq!(layout.resolve_status("In Review"), column("backlog"));
    assert_eq!(layout.resolve_status("Review"), column("review"));
    assert_eq!(layout.resolve_status(""), column("backlog"));
}

#[rstest]
fn layout_rejects_duplicates_and_unknown_default() {
    let todo = Column::new(column("todo"), "To Do");

    assert_eq!(
        BoardLayout::new(vec![todo.clone(), todo.clone()], column("todo")),
        Err(BoardDomainError::DuplicateColumn(column("todo")))
    );
    assert_eq!(
        BoardLayout::new(vec![todo], column("done")),
        Err(BoardDomainError::UnknownDefaultColumn(column("done")))
    );
    assert_eq!(
        BoardLayout::new(Vec::new(), column("todo")),
        Err(BoardDomainError::EmptyLayout)
    );
}

#[rstest]
fn draft_trims_title_and_rejects_blank() {
    let draft = TaskDraft::new("  Ship it  ").expect("valid draft");

    assert_eq!(draft.title(), "Ship it");
    assert_eq!(TaskDraft::new("   "), Err(BoardDomainError::EmptyTitle));
}

#[rstest]
#[case("high", Priority::High)]
#[case("Medium", Priority::Medium)]
#[case(" LOW ", Priority::Low)]
fn priority_parses_case_insensitively(#[case] raw: &str, #[case] expected: Priority) {
    assert_eq!(Priority::try_from(raw), Ok(expected));
}

#[rstest]
fn priority_rejects_unknown_values() {
    assert!(Priority::try_from("urgent").is_err());
}

#[rstest]
fn task_deserializes_wire_aliases() {
    let json = r#"{
        "_id": "42",
        "title": "Wire",
        "priority": "High",
        "status": "In Progress",
        "taskDataId": "7",
        "attachments": [{"name": "spec.pdf", "url": "/uploads/spec.pdf"}],
        "comments": [{"_id": "c1", "text": "hi", "author": "Ann", "createdAt": "2024-05-01T10:00:00Z"}]
    }"#;

    let task: Task = serde_json::from_str(json).expect("valid task json");

    assert_eq!(task.id(), &id("42"));
    assert_eq!(task.priority(), Priority::High);
    assert_eq!(task.parent_id(), Some(&id("7")));
    assert_eq!(task.kind(), TaskKind::Subtask);
    assert_eq!(task.attachments()[0].preview_uri(), Some("/uploads/spec.pdf"));
    assert_eq!(task.comments()[0].body(), "hi");
}

#[rstest]
fn payload_carries_discriminator_and_detects_binary_attachments() {
    let mut task = Task::new(id("1"), "Upload", "todo");
    task.set_attachments(vec![Attachment::new("a.png").with_content(vec![1, 2, 3])]);
    let payload = TaskPayload::for_task(&task);

    let json = serde_json::to_value(&payload).expect("payload serializes");

    assert_eq!(json["taskType"], "task");
    assert_eq!(json["title"], "Upload");
    assert!(json["attachments"][0].get("content").is_none());
    assert!(payload.has_binary_attachments());
}

#[rstest]
fn subtasks_point_at_their_parent() {
    let mut parent = Task::new(id("1"), "Parent", "todo");
    parent.push_subtask(Task::new(id("2"), "Child", "todo"));
    let renamed = parent.with_id(id("9"));

    assert_eq!(renamed.subtasks()[0].parent_id(), Some(&id("9")));
    assert_eq!(renamed.subtasks()[0].kind(), TaskKind::Subtask);
}

#[rstest]
fn patch_merges_only_present_fields() {
    let mut task = Task::new(id("1"), "Before", "todo");
    task.set_description("keep me");
    let mut patch = TaskPatch::new(id("1"));
    patch.title = Some("After".to_owned());
    patch.time_spent = Some(90);

    patch.apply_to(&mut task);

    assert_eq!(task.title(), "After");
    assert_eq!(task.description(), "keep me");
    assert_eq!(task.status(), "todo");
    assert_eq!(
        task.timer(),
        Some(TimerState {
            is_running: false,
            time_spent: 90
        })
    );
}

#[rstest]
fn comment_edit_marks_edited() {
    let mut comment = Comment::draft("first", "Ann", &DefaultClock);
    assert!(comment.id().is_none());

    comment.edit("second");

    assert_eq!(comment.body(), "second");
    assert!(comment.is_edited());
}

#[rstest]
fn activity_prefers_update_then_completion_then_creation() {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).single();
    let completed = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).single();
    let updated = Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).single();
    let mut task = Task::new(id("1"), "Timed", "completed");

    task.set_timestamps(created, None, None);
    assert_eq!(task.activity_at(), created);
    task.set_timestamps(created, None, completed);
    assert_eq!(task.activity_at(), completed);
    task.set_timestamps(created, updated, completed);
    assert_eq!(task.activity_at(), updated);
}

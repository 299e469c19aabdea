//! End-to-end board flows against the in-memory gateway.

use super::helpers::{TestStore, column, column_ids, gateway, record, store_over};
use eyre::WrapErr;
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{Priority, TaskDraft, TaskId},
    services::SyncOutcome,
};

async fn create(store: &TestStore, title: &str, column_id: &str) -> Result<TaskId, eyre::Report> {
    let draft = TaskDraft::new(title).wrap_err("build draft")?;
    let ticket = store.create_task(draft, &column(column_id)?)?;
    eyre::ensure!(ticket.placeholder().is_placeholder(), "expected a placeholder id");
    let created = ticket.settled().await.wrap_err("persist created task")?;
    Ok(created.id().clone())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_move_across_columns(gateway: InMemoryTaskGateway) -> Result<(), eyre::Report> {
    let store = store_over(&gateway);

    let created = create(&store, "A", "todo").await?;
    eyre::ensure!(created.as_str() == "1", "unexpected id {created}");
    eyre::ensure!(column_ids(&store, "todo")? == ["1"], "placeholder left behind");

    let outcome = store
        .move_task(&created, &column("todo")?, &column("completed")?, Some(0))
        .settled()
        .await?;

    eyre::ensure!(outcome == SyncOutcome::Persisted, "move not persisted");
    eyre::ensure!(column_ids(&store, "todo")?.is_empty(), "todo should be empty");
    eyre::ensure!(column_ids(&store, "completed")? == ["1"], "task not in completed");
    let moved = store
        .get_task_by_id(&created)
        .ok_or_else(|| eyre::eyre!("moved task missing"))?;
    eyre::ensure!(moved.status() == "completed", "status not rewritten");
    eyre::ensure!(moved.completed_at().is_some(), "server did not stamp completion");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_survive_a_fresh_hydration(gateway: InMemoryTaskGateway) -> Result<(), eyre::Report> {
    let store = store_over(&gateway);
    let created = create(&store, "Plan sprint", "backlog").await?;

    store
        .set_priority(&created, &column("backlog")?, Priority::High)
        .settled()
        .await?;
    store
        .set_description(&created, &column("backlog")?, "Pick top five")
        .settled()
        .await?;
    store.add_comment(&created, "Agreed in standup").settled().await?;

    let other = store_over(&gateway);
    other.fetch_and_set_tasks().await?;

    let task = other
        .get_task_by_id(&created)
        .ok_or_else(|| eyre::eyre!("task missing after hydration"))?;
    eyre::ensure!(task.priority() == Priority::High, "priority lost");
    eyre::ensure!(task.description() == "Pick top five", "description lost");
    let comments = other.comments(&created);
    eyre::ensure!(comments.len() == 1, "expected one comment");
    eyre::ensure!(
        comments.iter().all(|comment| comment.id().is_some()),
        "comment missing server id"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtask_round_trip(gateway: InMemoryTaskGateway) -> Result<(), eyre::Report> {
    gateway.seed([record("500", "Epic", "inprogress")]);
    let store = store_over(&gateway);
    store.fetch_and_set_tasks().await?;
    let parent = TaskId::new("500");

    let draft = TaskDraft::new("Story")?.with_parent(parent.clone());
    let subtask = store
        .create_task(draft, &column("inprogress")?)?
        .settled()
        .await?;
    store
        .set_title(subtask.id(), &column("inprogress")?, "Story, revised")
        .settled()
        .await?;

    let stored_parent = gateway
        .stored_tasks()
        .into_iter()
        .find(|task| task.id() == &parent)
        .ok_or_else(|| eyre::eyre!("parent missing from gateway"))?;
    let stored_child = stored_parent
        .subtask(subtask.id())
        .ok_or_else(|| eyre::eyre!("subtask missing from gateway"))?;
    eyre::ensure!(stored_child.title() == "Story, revised", "subtask title not stored");
    eyre::ensure!(stored_child.parent_id() == Some(&parent), "subtask lost its parent");
    eyre::ensure!(column_ids(&store, "inprogress")? == ["500"], "subtask leaked into column");
    Ok(())
}

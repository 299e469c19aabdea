//! Hydration, remote patches and failure recovery.

use std::io;

use super::helpers::{column, column_ids, gateway, record, store_over};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::TaskId,
    ports::{GatewayError, PushEvent},
    services::{BoardError, HistoryFilter, SyncOutcome},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hydration_buckets_unknown_statuses_into_backlog(
    gateway: InMemoryTaskGateway,
) -> Result<(), eyre::Report> {
    gateway.seed([
        record("1", "Known", "Review"),
        record("2", "Unknown", "Blocked"),
        record("3", "Blank", ""),
    ]);
    let store = store_over(&gateway);

    let placed = store.fetch_and_set_tasks().await?;

    eyre::ensure!(placed == 3, "expected three tasks, placed {placed}");
    eyre::ensure!(column_ids(&store, "review")? == ["1"], "review mismatch");
    eyre::ensure!(column_ids(&store, "backlog")? == ["2", "3"], "backlog mismatch");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outage_reverts_and_surfaces_the_error(
    gateway: InMemoryTaskGateway,
) -> Result<(), eyre::Report> {
    gateway.seed([record("1", "Stable", "todo")]);
    let store = store_over(&gateway);
    store.fetch_and_set_tasks().await?;
    let before = store.snapshot();
    gateway.set_outage(Some(GatewayError::transport(io::Error::other("down"))));

    let result = store
        .move_task(&TaskId::new("1"), &column("todo")?, &column("review")?, None)
        .settled()
        .await;

    eyre::ensure!(
        matches!(result, Err(BoardError::Gateway(GatewayError::Transport(_)))),
        "expected a transport error, got {result:?}"
    );
    eyre::ensure!(store.snapshot() == before, "move was not reverted");
    eyre::ensure!(gateway.update_calls().len() == 2, "expected one retry");

    gateway.set_outage(None);
    let outcome = store
        .move_task(&TaskId::new("1"), &column("todo")?, &column("review")?, None)
        .settled()
        .await?;
    eyre::ensure!(outcome == SyncOutcome::Persisted, "move after recovery failed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn decoded_push_events_update_the_board(
    gateway: InMemoryTaskGateway,
) -> Result<(), eyre::Report> {
    gateway.seed([record("1", "Shared", "todo")]);
    let store = store_over(&gateway);
    store.fetch_and_set_tasks().await?;

    let patch = PushEvent::decode("task:update", r#"{"_id":"1","title":"Shared (edited)"}"#)?;
    let timer = PushEvent::decode(
        "timer:update",
        r#"{"taskId":"1","isRunning":true,"timeSpent":42}"#,
    )?;

    eyre::ensure!(store.apply_push(&patch), "task patch not applied");
    eyre::ensure!(store.apply_push(&timer), "timer patch not applied");

    let task = store
        .get_task_by_id(&TaskId::new("1"))
        .ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(task.title() == "Shared (edited)", "title not merged");
    let timer_state = task.timer().ok_or_else(|| eyre::eyre!("timer missing"))?;
    eyre::ensure!(timer_state.is_running && timer_state.time_spent == 42, "timer not merged");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_lists_tasks_completed_through_the_board(
    gateway: InMemoryTaskGateway,
) -> Result<(), eyre::Report> {
    gateway.seed([record("1", "Finish me", "todo"), record("2", "Leave me", "todo")]);
    let store = store_over(&gateway);
    store.fetch_and_set_tasks().await?;

    store
        .move_task(&TaskId::new("1"), &column("todo")?, &column("completed")?, None)
        .settled()
        .await?;
    let history = store.completed_history(&HistoryFilter::All).await?;

    let titles: Vec<&str> = history.iter().map(|task| task.title()).collect();
    eyre::ensure!(titles == ["Finish me"], "unexpected history {titles:?}");
    Ok(())
}

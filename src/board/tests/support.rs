//! Shared fixtures for board unit tests.

use std::{sync::Arc, time::Duration};

use crate::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{ColumnId, Task, TaskId},
    services::{BoardStore, RetryPolicy, StoreConfig},
};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type TestStore = BoardStore<InMemoryTaskGateway, DefaultClock>;

pub(super) fn column(id: &str) -> ColumnId {
    ColumnId::new(id).expect("valid column id")
}

pub(super) fn id(value: &str) -> TaskId {
    TaskId::new(value)
}

/// Retries quickly so transient-failure tests stay fast.
pub(super) fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(2),
    }
}

/// Seeds todo=[101, 102], inprogress=[103], backlog=[106] and
/// review=[104 with subtask 105].
pub(super) fn seed_tasks() -> Vec<Task> {
    let mut release = Task::new(id("104"), "Release", "review");
    release.push_subtask(Task::new(id("105"), "Changelog", "review"));
    vec![
        Task::new(id("101"), "Write docs", "todo"),
        Task::new(id("102"), "Fix parser", "todo"),
        Task::new(id("103"), "Refactor", "In Progress"),
        Task::new(id("106"), "Orphan", "someday"),
        release,
    ]
}

#[fixture]
pub(super) fn gateway() -> InMemoryTaskGateway {
    let gateway = InMemoryTaskGateway::new();
    gateway.seed(seed_tasks());
    gateway
}

pub(super) fn store_for(gateway: &InMemoryTaskGateway) -> TestStore {
    BoardStore::with_config(
        Arc::new(gateway.clone()),
        Arc::new(DefaultClock),
        StoreConfig::default().with_retry(fast_retry()),
    )
}

pub(super) async fn hydrated(gateway: &InMemoryTaskGateway) -> TestStore {
    let store = store_for(gateway);
    store
        .fetch_and_set_tasks()
        .await
        .expect("hydration should succeed");
    store
}

pub(super) fn ids(store: &TestStore, column_id: &str) -> Vec<String> {
    store
        .tasks(&column(column_id))
        .iter()
        .map(|task| task.id().as_str().to_owned())
        .collect()
}

//! Shared test helpers for in-memory board integration tests.

use std::{sync::Arc, time::Duration};

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::{ColumnId, Task, TaskId},
    services::{BoardStore, RetryPolicy, StoreConfig},
};

/// Store type used across integration tests.
pub type TestStore = BoardStore<InMemoryTaskGateway, DefaultClock>;

/// Provides an empty in-memory gateway for each test.
#[fixture]
pub fn gateway() -> InMemoryTaskGateway {
    InMemoryTaskGateway::new()
}

/// Builds a store over a shared handle to `gateway` with fast retries.
pub fn store_over(gateway: &InMemoryTaskGateway) -> TestStore {
    let retry = RetryPolicy {
        max_attempts: 2,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(1),
    };
    BoardStore::with_config(
        Arc::new(gateway.clone()),
        Arc::new(DefaultClock),
        StoreConfig::default().with_retry(retry),
    )
}

/// Parses a column identifier.
///
/// # Errors
///
/// Returns an error if the identifier is blank.
pub fn column(id: &str) -> Result<ColumnId, eyre::Report> {
    ColumnId::new(id).map_err(|err| eyre::eyre!("invalid column {id}: {err}"))
}

/// Returns the identifiers of a column in display order.
///
/// # Errors
///
/// Returns an error if the column identifier is blank.
pub fn column_ids(store: &TestStore, id: &str) -> Result<Vec<String>, eyre::Report> {
    Ok(store
        .tasks(&column(id)?)
        .iter()
        .map(|task| task.id().as_str().to_owned())
        .collect())
}

/// Builds a persisted-looking record.
pub fn record(id: &str, title: &str, status: &str) -> Task {
    Task::new(TaskId::new(id), title, status)
}

//! Shared world state for board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::InMemoryTaskGateway,
    domain::ColumnId,
    services::{BoardError, BoardStore, RetryPolicy, StoreConfig, SyncOutcome},
};

/// Store type used by the BDD world.
pub type TestStore = BoardStore<InMemoryTaskGateway, DefaultClock>;

/// Scenario world for board behaviour tests.
pub struct BoardWorld {
    pub gateway: InMemoryTaskGateway,
    pub store: TestStore,
    pub last_outcome: Option<Result<SyncOutcome, BoardError>>,
}

impl BoardWorld {
    /// Creates a world over an empty service without retries.
    #[must_use]
    pub fn new() -> Self {
        let gateway = InMemoryTaskGateway::new();
        let store = BoardStore::with_config(
            Arc::new(gateway.clone()),
            Arc::new(DefaultClock),
            StoreConfig::default().with_retry(RetryPolicy::none()),
        );
        Self {
            gateway,
            store,
            last_outcome: None,
        }
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a column identifier from step text.
///
/// # Errors
///
/// Returns an error when the identifier is blank.
pub fn column(raw: &str) -> Result<ColumnId, eyre::Report> {
    ColumnId::new(raw).map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))
}

//! Completed-task history.

use super::{BoardResult, BoardStore, pipeline::with_retry};
use crate::board::{
    domain::{ColumnId, Task},
    ports::TaskGateway,
};
use chrono::NaiveDate;
use mockable::Clock;

const COMPLETED_STATUS: &str = "completed";

/// Narrows the completed-task history by activity time (UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HistoryFilter {
    /// Every completed task.
    #[default]
    All,
    /// Tasks whose activity falls on the calendar date.
    Date(NaiveDate),
    /// Tasks whose activity time starts with the prefix, such as `"14:05"`
    /// or `"14"`.
    Time(String),
}

impl HistoryFilter {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Date(date) => task
                .activity_at()
                .is_some_and(|at| at.date_naive() == *date),
            Self::Time(prefix) => task
                .activity_at()
                .is_some_and(|at| at.format("%H:%M").to_string().starts_with(prefix.as_str())),
        }
    }
}

/// Keeps the tasks whose normalized status is `completed` and that match
/// `filter`, preserving order.
#[must_use]
pub fn completed_tasks(tasks: &[Task], filter: &HistoryFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| ColumnId::normalize(task.status()) == COMPLETED_STATUS)
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

impl<G, C> BoardStore<G, C>
where
    G: TaskGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Fetches every task from the service and returns the completed ones
    /// matching `filter`. The board is not modified.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn completed_history(&self, filter: &HistoryFilter) -> BoardResult<Vec<Task>> {
        let records =
            with_retry(&self.config.retry, "completed_history", || self.gateway.get_all_tasks())
                .await?;
        Ok(completed_tasks(&records, filter))
    }
}

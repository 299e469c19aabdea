//! Store configuration: board layout, retry policy and comment author.

use crate::board::domain::BoardLayout;
use std::time::Duration;

/// Retry schedule for persistence calls that fail transiently.
///
/// # Examples
///
/// ```
/// use taskboard::board::services::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
///
/// let once = RetryPolicy::none();
/// assert_eq!(once.max_attempts, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero behaves like one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound for the doubled delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Returns the delay to wait after the given failed attempt (1-based).
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(2_u32.saturating_pow(exponent))
            .min(self.max_backoff)
    }
}

/// Configuration for a [`super::BoardStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Columns and fallback column.
    pub layout: BoardLayout,
    /// Retry schedule for updates and fetches.
    pub retry: RetryPolicy,
    /// Author label stamped on new comments.
    pub author: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            layout: BoardLayout::standard(),
            retry: RetryPolicy::default(),
            author: "You".to_owned(),
        }
    }
}

impl StoreConfig {
    /// Sets the board layout.
    #[must_use]
    pub fn with_layout(mut self, layout: BoardLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the comment author label.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }
}

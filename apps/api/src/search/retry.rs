//! Bounded retry with a fixed backoff for calls to the search collaborator.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::SearchError;

/// Retry budget for one outbound search call. Injectable so tests can run
/// without sleeping.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn no_backoff() -> Self {
        Self {
            backoff: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Runs `op` up to `max_retries + 1` times, sleeping `backoff` between
    /// attempts. Only retryable errors consume the budget; anything else
    /// propagates immediately. The last error wins once the budget is spent.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, SearchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SearchError>>,
    {
        let attempts = self.max_retries + 1;
        let mut last_error: Option<SearchError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                warn!(
                    "search call failed, retrying ({attempt}/{})...",
                    self.max_retries
                );
                tokio::time::sleep(self.backoff).await;
            }
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() => last_error = Some(err),
                Err(err) => return Err(err),
            }
        }

        Err(last_error.unwrap_or(SearchError::RetriesExhausted { attempts }))
    }
}

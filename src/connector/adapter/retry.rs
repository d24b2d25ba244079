//! Retry with exponential backoff for transport failures.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::CompletionResult;

/// How often and how patiently a completion call is retried.
///
/// Only failures for which [`crate::domain::CompletionError::is_retryable`]
/// holds are retried; API errors and malformed bodies are returned as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Attempts made after the first one.
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self::new(0)
    }

    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    pub fn with_max_backoff(mut self, backoff: Duration) -> Self {
        self.max_backoff = backoff;
        self
    }

    /// Delay before retry number `retry` (0-based), capped at `max_backoff`.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(retry as i32);
        let millis = self.initial_backoff.as_millis() as f64 * factor;
        let capped = millis.min(self.max_backoff.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the retry budget is spent. The closure receives the attempt number.
    pub async fn run<F, Fut>(&self, mut operation: F) -> CompletionResult
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = CompletionResult>,
    {
        let mut attempt = 0;
        loop {
            match operation(attempt).await {
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.backoff_for(attempt);
                    warn!(
                        "Attempt {} failed: {}. Retrying in {:?}",
                        attempt + 1,
                        e,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                outcome => {
                    if attempt > 0 {
                        debug!("Completion settled after {} attempts", attempt + 1);
                    }
                    return outcome;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CompletionError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries).with_initial_backoff(Duration::from_millis(1))
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let policy = RetryPolicy::new(5)
            .with_initial_backoff(Duration::from_millis(100))
            .with_max_backoff(Duration::from_millis(350));
        assert_eq!(policy.backoff_for(0), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(350));
        assert_eq!(policy.backoff_for(6), Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_network_errors_are_retried_until_budget_spent() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = fast(2)
            .run(move |_| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(CompletionError::Network("connection refused".into()))
            })
            .await;

        assert!(matches!(result, Err(CompletionError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let result = fast(3)
            .run(|attempt| async move {
                if attempt == 0 {
                    Err(CompletionError::Network("reset".into()))
                } else {
                    Ok(format!("attempt {attempt}"))
                }
            })
            .await;

        assert_eq!(result.unwrap(), "attempt 1");
    }

    #[tokio::test]
    async fn test_api_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = fast(3)
            .run(move |_| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(CompletionError::Api("invalid key".into()))
            })
            .await;

        assert!(matches!(result, Err(CompletionError::Api(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_default_policy_makes_one_attempt() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let _ = RetryPolicy::default()
            .run(move |_| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(CompletionError::Network("offline".into()))
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

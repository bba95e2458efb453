//! Retry logic with bounded exponential backoff
//!
//! Wraps residency-store calls using the `backon` crate. Only errors the
//! store classifies as transient ([`StorageError::is_retryable`]) are
//! retried; a definitive rejection is returned immediately. When retries
//! exhaust, the last error propagates — the gates fail closed on it.

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};

use super::StorageError;

/// Bounded backoff policy for store calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first (must be >= 1)
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Cap applied to the exponentially growing delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries (single attempt)
    pub fn none() -> Self {
        RetryPolicy {
            max_attempts: 1,
            ..Default::default()
        }
    }
}

/// Execute a store operation with retry under the given policy.
///
/// Backoff is exponential with jitter, starting at `initial_backoff` and
/// capped at `max_backoff`.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, operation: F) -> Result<T, StorageError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StorageError>>,
{
    // backon counts retries, not total attempts
    let max_retries = policy.max_attempts.saturating_sub(1) as usize;

    let backoff = ExponentialBuilder::new()
        .with_min_delay(policy.initial_backoff)
        .with_max_delay(policy.max_backoff)
        .with_max_times(max_retries)
        .with_jitter();

    operation
        .retry(backoff)
        .sleep(tokio::time::sleep)
        .when(|e: &StorageError| e.is_retryable())
        .notify(|err: &StorageError, dur: Duration| {
            tracing::debug!(
                backoff_ms = dur.as_millis() as u64,
                error = %err,
                "retrying store operation after backoff"
            );
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_transient_errors_retried_until_success() {
        let attempts = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
        };

        let result = with_retry(&policy, || async {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(StorageError::Unavailable("throttled".into()))
            } else {
                Ok(42u32)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_returned_immediately() {
        let attempts = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
        };

        let result: Result<u32, _> = with_retry(&policy, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Database("constraint violation".into()))
        })
        .await;

        assert!(matches!(result, Err(StorageError::Database(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let attempts = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
        };

        let result: Result<u32, _> = with_retry(&policy, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Unavailable("still down".into()))
        })
        .await;

        assert!(matches!(result, Err(StorageError::Unavailable(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}

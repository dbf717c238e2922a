//! Retry policy for outbound calls.
//!
//! [`retry`] wraps any fallible async operation. Each call moves through
//! `attempting(k)` states until the operation succeeds, fails with a
//! terminal error, or the attempt budget is spent.

use std::future::Future;

use super::config::RetryConfig;
use crate::Result;

/// Run `operation` under `config`, retrying transient failures.
///
/// - Success is returned immediately.
/// - Errors for which [`Error::is_retryable`](crate::Error::is_retryable)
///   is `false` (4xx responses, auth and validation failures) are returned
///   on the spot without sleeping.
/// - Retryable errors sleep `config.backoff_for_attempt(k)` and try again,
///   up to `config.max_attempts` attempts in total; the last error is
///   returned once the budget is exhausted.
///
/// Dropping the returned future cancels the in-flight attempt or sleep.
///
/// # Example
///
/// ```
/// use walmart_rs::{Error, RetryConfig};
/// use walmart_rs::client::retry;
///
/// # async fn example() -> walmart_rs::Result<()> {
/// let value = retry(&RetryConfig::default(), "demo", || async {
///     Ok::<_, Error>(42)
/// })
/// .await?;
/// assert_eq!(value, 42);
/// # Ok(())
/// # }
/// ```
pub async fn retry<T, F, Fut>(config: &RetryConfig, operation: &str, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        let err = match f().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !err.is_retryable() {
            return Err(err);
        }

        if attempt + 1 >= max_attempts {
            tracing::warn!(
                operation,
                attempts = max_attempts,
                error = %err,
                "giving up after exhausting retry attempts"
            );
            return Err(err);
        }

        let delay = config.backoff_for_attempt(attempt);
        tracing::warn!(
            operation,
            attempt = attempt + 1,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "transient failure, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

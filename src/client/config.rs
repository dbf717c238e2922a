//! Client configuration options.

use std::time::Duration;

/// Configuration for the Walmart Marketplace client.
///
/// # Example
///
/// ```
/// use walmart_rs::{ClientConfig, RetryConfig};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0")
///     .with_retry(RetryConfig::default());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Retry configuration applied to endpoint operations
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("walmart-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::endpoint_default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Configuration for automatic retries.
///
/// Transient failures (5xx responses and network errors) are retried with
/// exponential backoff: the delay after attempt `k` (starting at 0) is
/// `base_delay * 2^k`. Client errors are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound for a single backoff sleep
    pub max_backoff: Option<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
            max_backoff: None,
        }
    }
}

impl RetryConfig {
    /// The policy endpoint operations use unless configured otherwise:
    /// 20 attempts starting from a 5 second delay.
    pub fn endpoint_default() -> Self {
        Self {
            max_attempts: 20,
            base_delay: Duration::from_secs(5),
            max_backoff: None,
        }
    }

    /// Create a configuration that makes a single attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Set the total number of attempts.
    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }

    /// Set the base backoff delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Cap every backoff sleep at `duration`.
    pub fn with_max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = Some(duration);
        self
    }

    /// Calculate the backoff duration after a failed attempt.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        let backoff = self.base_delay.saturating_mul(factor);
        match self.max_backoff {
            Some(max) => backoff.min(max),
            None => backoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry, RetryConfig::endpoint_default());
        assert!(config.user_agent.starts_with("walmart-rs/"));
    }

    #[test]
    fn test_retry_defaults() {
        let library = RetryConfig::default();
        assert_eq!(library.max_attempts, 5);
        assert_eq!(library.base_delay, Duration::from_secs(1));

        let endpoint = RetryConfig::endpoint_default();
        assert_eq!(endpoint.max_attempts, 20);
        assert_eq!(endpoint.base_delay, Duration::from_secs(5));

        assert_eq!(RetryConfig::no_retry().max_attempts, 1);
    }

    #[test]
    fn test_retry_backoff() {
        let config = RetryConfig::default();
        assert_eq!(config.backoff_for_attempt(0), Duration::from_secs(1));
        assert_eq!(config.backoff_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.backoff_for_attempt(2), Duration::from_secs(4));
    }

    #[test]
    fn test_retry_backoff_max() {
        let config = RetryConfig::default()
            .with_base_delay(Duration::from_secs(10))
            .with_max_backoff(Duration::from_secs(30));

        // 10 * 2^3 = 80, but capped at 30
        assert_eq!(config.backoff_for_attempt(3), Duration::from_secs(30));
    }

    #[test]
    fn test_retry_backoff_saturates() {
        let config = RetryConfig::endpoint_default();
        assert_eq!(config.backoff_for_attempt(200), Duration::MAX);
    }
}

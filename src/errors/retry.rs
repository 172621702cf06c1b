use std::time::Duration;
use std::future::Future;

use super::classification::ErrorClassification;
use super::types::GuardiaoError;
use tracing::warn;

impl ErrorClassification {
    /// Delay before the next attempt (0-indexed).
    ///
    /// - RateLimitError: 5s + (attempt * 5s), capped at 30s
    /// - Default: base * 2^attempt + random jitter (0-250ms), capped at 10s
    pub fn retry_delay(&self, base: Duration, attempt: u32) -> Duration {
        match self.error_type {
            "RateLimitError" => {
                let secs = 5 + (attempt as u64 * 5);
                Duration::from_secs(secs.min(30))
            }
            _ => {
                let factor = 2u32.saturating_pow(attempt);
                let jitter = Duration::from_millis(rand::random::<u64>() % 250);
                base.saturating_mul(factor).saturating_add(jitter).min(Duration::from_secs(10))
            }
        }
    }
}

/// Retry policy wrapped around every call to an external capability.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            base_delay: Duration::from_millis(1000),
        }
    }
}

/// Execute an async operation, retrying while the error is classified retryable
/// and the retry budget is not exhausted.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, GuardiaoError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GuardiaoError>>,
{
    let max_attempts = config.max_retries + 1;
    let mut attempt = 0;

    loop {
        let err = match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let classification = err.classify();
        if !classification.retryable {
            warn!(
                operation = operation_name,
                error_type = classification.error_type,
                "Non-retryable error, failing immediately"
            );
            return Err(err);
        }
        if attempt + 1 >= max_attempts {
            warn!(
                operation = operation_name,
                attempt = attempt + 1,
                max = max_attempts,
                "Max retries exhausted"
            );
            return Err(err);
        }

        let delay = classification.retry_delay(config.base_delay, attempt);
        warn!(
            operation = operation_name,
            attempt = attempt + 1,
            max = max_attempts,
            error_type = classification.error_type,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Retrying after error"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig { max_retries, base_delay: Duration::from_millis(1) }
    }

    #[test]
    fn test_retry_delay_rate_limit() {
        let class = ErrorClassification { error_type: "RateLimitError", retryable: true };
        let base = Duration::from_millis(100);
        assert_eq!(class.retry_delay(base, 0), Duration::from_secs(5));
        assert_eq!(class.retry_delay(base, 1), Duration::from_secs(10));
        assert_eq!(class.retry_delay(base, 20), Duration::from_secs(30)); // capped
    }

    #[test]
    fn test_retry_delay_default_exponential() {
        let class = ErrorClassification { error_type: "NetworkError", retryable: true };
        let base = Duration::from_millis(1000);
        let d0 = class.retry_delay(base, 0);
        let d1 = class.retry_delay(base, 1);
        assert!(d0 >= Duration::from_millis(1000) && d0 < Duration::from_millis(1250));
        assert!(d1 >= Duration::from_millis(2000) && d1 < Duration::from_millis(2250));
        assert_eq!(class.retry_delay(base, 10), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_first_try() {
        let result = with_retry("test", &fast_config(1), || async {
            Ok::<_, GuardiaoError>(42)
        }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_retry_non_retryable_fails_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &fast_config(3), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(GuardiaoError::Authentication("bad key".into()))
            }
        }).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_single_retry_then_success() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &fast_config(1), || {
            let attempts = attempts_clone.clone();
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(GuardiaoError::Network("reset".into()))
                } else {
                    Ok("ok")
                }
            }
        }).await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_with_retry_zero_retries_single_attempt() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &fast_config(0), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(GuardiaoError::Timeout("slow".into()))
            }
        }).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}

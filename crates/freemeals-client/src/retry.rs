//! Retry with exponential back-off and jitter for provider fetches.
//!
//! Only transient failures are retried: a timeout, a refused connection, or a
//! 5xx from the endpoint. Everything else is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection refused/reset.
/// - HTTP 5xx responses.
///
/// **Not retriable:**
/// - [`FetchError::UnexpectedStatus`] with a 4xx status.
/// - [`FetchError::Deserialize`]: the same body would come back.
/// - [`FetchError::InvalidEndpoint`]: configuration problem.
pub(crate) fn is_retriable(err: &FetchError) -> bool {
    match err {
        FetchError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        FetchError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        FetchError::Deserialize { .. } | FetchError::InvalidEndpoint { .. } => false,
    }
}

/// How often and how patiently a provider fetch is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_ms: u64,
}

impl RetryPolicy {
    const MAX_DELAY_MS: u64 = 10_000;

    /// Un-jittered delay before retry number `retry` (1-based):
    /// `backoff_base_ms` doubled per earlier retry, capped at 10 s.
    pub(crate) fn base_delay(self, retry: u32) -> Duration {
        let doublings = retry.saturating_sub(1).min(10);
        let ms = self
            .backoff_base_ms
            .saturating_mul(1u64 << doublings)
            .min(Self::MAX_DELAY_MS);
        Duration::from_millis(ms)
    }

    /// [`Self::base_delay`] scaled by a random factor in `0.75..=1.25`.
    fn jittered_delay(self, retry: u32) -> Duration {
        self.base_delay(retry).mul_f64(rand::random_range(0.75..=1.25))
    }

    /// Runs `operation`, retrying transient failures up to `max_retries` times.
    ///
    /// The error from the last attempt is returned once retries run out;
    /// errors that [`is_retriable`] rejects are returned straight away.
    pub(crate) async fn run<T, F, Fut>(
        self,
        location: &str,
        mut operation: F,
    ) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut result = operation().await;
        for retry in 1..=self.max_retries {
            let err = match result {
                Err(err) if is_retriable(&err) => err,
                done => return done,
            };
            let delay = self.jittered_delay(retry);
            tracing::warn!(
                location,
                retry,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "provider fetch failed, retrying"
            );
            tokio::time::sleep(delay).await;
            result = operation().await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn deserialize_err() -> FetchError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        FetchError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            backoff_base_ms: 0,
        }
    }

    async fn connect_error() -> FetchError {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1")
            .send()
            .await
            .unwrap_err();
        FetchError::Http(err)
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        assert!(!is_retriable(&deserialize_err()));
    }

    #[test]
    fn client_error_status_is_not_retriable() {
        assert!(!is_retriable(&FetchError::UnexpectedStatus {
            status: 404,
            url: "http://x".to_owned()
        }));
    }

    #[test]
    fn server_error_status_is_retriable() {
        assert!(is_retriable(&FetchError::UnexpectedStatus {
            status: 503,
            url: "http://x".to_owned()
        }));
    }

    #[tokio::test]
    async fn connect_error_is_retriable() {
        assert!(is_retriable(&connect_error().await));
    }

    #[test]
    fn base_delay_doubles_per_retry_and_is_capped() {
        let policy = RetryPolicy {
            max_retries: 20,
            backoff_base_ms: 500,
        };
        assert_eq!(policy.base_delay(1), Duration::from_millis(500));
        assert_eq!(policy.base_delay(2), Duration::from_millis(1_000));
        assert_eq!(policy.base_delay(3), Duration::from_millis(2_000));
        assert_eq!(policy.base_delay(6), Duration::from_millis(10_000));
        assert_eq!(policy.base_delay(15), Duration::from_millis(10_000));
    }

    #[test]
    fn jitter_stays_within_a_quarter_of_the_base_delay() {
        let policy = RetryPolicy {
            max_retries: 1,
            backoff_base_ms: 400,
        };
        for _ in 0..100 {
            let delay = policy.jittered_delay(1);
            assert!(delay >= Duration::from_millis(300), "{delay:?}");
            assert!(delay <= Duration::from_millis(500), "{delay:?}");
        }
    }

    #[tokio::test]
    async fn zero_retries_makes_a_single_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = policy(0)
            .run("York", || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err::<u32, _>(FetchError::UnexpectedStatus {
                        status: 503,
                        url: "http://x".to_owned(),
                    })
                }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = policy(1).run("York", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, FetchError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_once_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = policy(1).run("York", || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err::<u32, _>(connect_error().await)
                } else {
                    Ok(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = policy(1).run("York", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(FetchError::UnexpectedStatus {
                    status: 502,
                    url: "http://x".to_owned(),
                })
            }
        })
        .await;
        assert!(matches!(
            result,
            Err(FetchError::UnexpectedStatus { status: 502, .. })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2, "one try plus one retry");
    }

    #[tokio::test]
    async fn does_not_retry_deserialize_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = policy(3).run("York", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(deserialize_err())
            }
        })
        .await;
        assert!(matches!(result, Err(FetchError::Deserialize { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

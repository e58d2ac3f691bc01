use std::future::Future;
use std::time::Duration;

use crate::error::ProviderError;

pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

const BACKOFF_UNIT: Duration = Duration::from_millis(1000);

/// Outcome of a single attempt, as classified by the caller.
///
/// Only a network-level send failure or an HTTP 500 is `Retry`; every
/// other non-success status (400, 401, 404, 503, ...) is `Fatal` and
/// surfaces immediately. This narrow policy is intentional and must
/// stay compatible with the deployed provider integration.
pub enum Attempt<T> {
    Done(T),
    Retry(ProviderError),
    Fatal(ProviderError),
}

/// Runs `op` up to `max_attempts` times with a linear backoff: the
/// n-th retry is preceded by a wait of `n * 1s` (1s, 2s, ...).
///
/// When attempts are exhausted the last retryable error is returned to
/// the caller, never swallowed.
pub async fn with_retry<T, F, Fut>(max_attempts: usize, mut op: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T>>,
{
    let max_attempts = max_attempts.max(1);
    let mut failures = 0usize;

    loop {
        match op().await {
            Attempt::Done(value) => return Ok(value),
            Attempt::Fatal(err) => return Err(err),
            Attempt::Retry(err) => {
                failures += 1;
                if failures >= max_attempts {
                    return Err(err);
                }
                let wait = BACKOFF_UNIT * failures as u32;
                tracing::warn!(
                    attempt = failures,
                    wait_ms = wait.as_millis() as u64,
                    error = %err,
                    "retryable provider failure, backing off"
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}

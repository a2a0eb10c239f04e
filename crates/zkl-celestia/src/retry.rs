//! Retry with exponential backoff for read-only RPC calls.
//!
//! Retries only on transport errors (connection failures, timeouts). Any
//! HTTP response, including a non-2xx one, is returned to the caller as-is.
//! `blob.Submit` is never routed through here: a retried submission could
//! pay for the same blob twice.

use std::time::Duration;

/// Base delay between retries; doubles each attempt.
const BASE_DELAY_MS: u64 = 200;

/// Send a request, retrying transport failures up to `max_retries` times.
///
/// Delays: 200ms, 400ms, 800ms, ...
pub(crate) async fn retry_send<F, Fut>(
    method: &str,
    max_retries: u32,
    f: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    for attempt in 0..max_retries {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                let delay = Duration::from_millis(BASE_DELAY_MS.saturating_mul(1 << attempt.min(16)));
                tracing::warn!(
                    method,
                    attempt = attempt + 1,
                    max_retries,
                    "Celestia RPC request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
    f().await
}

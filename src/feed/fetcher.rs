//! HTTP retrieval of the raw feed payload.
//!
//! The fetcher owns exactly one concern: turn a feed URL into bytes. It
//! never parses — the payload goes to [`crate::feed::parser`] untouched.

use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;

const MAX_RETRIES: u32 = 3;

/// Errors that can occur while fetching a feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Server returned 429 Too Many Requests after max retries
    #[error("Rate limited after {0} retries")]
    RateLimited(u32),
    /// Response body exceeded the configured size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    Incomplete { expected: u64, received: usize },
}

/// Fetches the feed at `url` and returns the raw response body.
///
/// # Behavior
///
/// - Each attempt is bounded by `timeout`
/// - Rate limiting (HTTP 429) and server errors (5xx) trigger exponential
///   backoff (2s, 4s, 8s) with up to 3 retries
/// - 4xx errors fail immediately
/// - The body is streamed with a `max_bytes` cap and a Content-Length
///   completeness check; incomplete downloads are retried
///
/// # Errors
///
/// See [`FetchError`]. Every variant is local to this fetch — callers
/// treat any error as "no items this cycle" and may simply re-trigger.
pub async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    max_bytes: usize,
) -> Result<Vec<u8>, FetchError> {
    let mut retry_count = 0;

    loop {
        let response = tokio::time::timeout(timeout, client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Network)?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            if retry_count >= MAX_RETRIES {
                return Err(FetchError::RateLimited(MAX_RETRIES));
            }

            let delay_secs = 2u64.pow(retry_count); // 2s, 4s, 8s
            tracing::warn!(
                feed = %url,
                retry = retry_count,
                delay_secs = delay_secs,
                "Rate limited, backing off"
            );
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;
            retry_count += 1;
            continue;
        }

        if response.status().is_server_error() {
            if retry_count >= MAX_RETRIES {
                return Err(FetchError::HttpStatus(response.status().as_u16()));
            }

            let delay_secs = 2u64.pow(retry_count);
            tracing::warn!(
                feed = %url,
                status = %response.status(),
                retry = retry_count,
                delay_secs = delay_secs,
                "Server error, retrying after delay"
            );
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;
            retry_count += 1;
            continue;
        }

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        match read_limited_bytes(response, max_bytes).await {
            Ok(bytes) => return Ok(bytes),
            Err(FetchError::Incomplete { expected, received }) => {
                if retry_count >= MAX_RETRIES {
                    return Err(FetchError::Incomplete { expected, received });
                }

                let delay_secs = 2u64.pow(retry_count);
                tracing::debug!(
                    feed = %url,
                    expected = expected,
                    received = received,
                    attempt = retry_count + 1,
                    delay_secs = delay_secs,
                    "Retrying incomplete download"
                );
                tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                retry_count += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let expected_length = response.content_length();

    // Fast path: check Content-Length header
    if let Some(len) = expected_length {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    // A short body means the connection dropped mid-transfer; the caller
    // retries with backoff.
    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::Incomplete {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

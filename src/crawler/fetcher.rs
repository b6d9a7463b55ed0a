//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client with a browser user agent
//! - GET requests to fetch page content
//! - Retry logic with exponential backoff for transient failures
//! - Error classification

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::{FetchError, FetchResult};

/// User agent sent with every page request.
///
/// Some sites serve an empty shell or an outright block page to anything
/// that does not identify as a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout covering connect, send, and body read.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// How much of an error response body to keep in the error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Retry behavior for transient fetch failures.
///
/// `backoff_base` is the delay before the second attempt; it doubles for
/// each attempt after that. Tests set it to zero to avoid real sleeps.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given (1-based) failed attempt: base, 2*base, 4*base...
    fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// HTTP fetcher with browser identification, timeouts, and bounded retries
///
/// Every fetch runs up to `max_attempts` times. Only failures that might
/// resolve on their own are retried: timeouts, connection errors, and the
/// transient status codes (429, 500, 502, 503, 504). Client errors such
/// as 404 are final on the first attempt. Redirects are followed by the
/// underlying client.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(retry: RetryPolicy) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self { client, retry })
    }

    /// Fetches the page at `url` and returns its body as text.
    ///
    /// Retries transient failures with exponential backoff before giving
    /// up; the returned error is from the final attempt.
    pub async fn fetch(&self, url: &Url) -> FetchResult<String> {
        let mut attempt = 1;
        loop {
            debug!("GET {} (attempt {}/{})", url, attempt, self.retry.max_attempts);
            match self.try_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(err) if attempt < self.retry.max_attempts && err.is_retryable() => {
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        "Attempt {}/{} for {} failed: {}; retrying in {:?}",
                        attempt, self.retry.max_attempts, url, err, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One request/response cycle with no retry logic.
    async fn try_fetch(&self, url: &Url) -> FetchResult<String> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let mut snippet = truncate_body(&body);
            if snippet.is_empty() {
                snippet = status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string();
            }
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(response.text().await?)
    }
}

/// Trims and caps an error body so it fits in a log line.
fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((idx, _)) => trimmed[..idx].to_string(),
        None => trimmed.to_string(),
    }
}

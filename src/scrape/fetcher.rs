//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for a batch, including:
//! - Building the HTTP client with the configured user agent
//! - GET requests with a fixed timeout per attempt
//! - Fixed-interval retries on transport errors and non-200 responses

use crate::config::FetcherConfig;
use crate::{AttemptError, FetchError, FetchResult};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Retry behavior of the fetcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,

    /// Timeout applied to each individual attempt
    pub request_timeout: Duration,

    /// Fixed wait between two consecutive attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            request_timeout: Duration::from_secs(10),
            backoff: Duration::from_secs(2),
        }
    }
}

impl From<&FetcherConfig> for RetryPolicy {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            request_timeout: config.request_timeout(),
            backoff: config.retry_backoff(),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy; the per-attempt
/// timeout is applied on each request by [`Fetcher`].
///
/// # Example
///
/// ```no_run
/// use page_gleaner::config::FetcherConfig;
/// use page_gleaner::scrape::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches page bodies under a [`RetryPolicy`]
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Builds a fetcher and its HTTP client from configuration
    pub fn from_config(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?, RetryPolicy::from(config)))
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches a URL, retrying on failure
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 200 | Return the body |
    /// | Any other status | Retry after backoff |
    /// | Timeout | Retry after backoff |
    /// | Connection / transport error | Retry after backoff |
    /// | Body read error | Retry after backoff |
    ///
    /// Every failed attempt is logged with its number and cause. There is
    /// no wait after the final attempt.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The decoded response body
    /// * `Err(FetchError::Exhausted)` - All attempts failed; carries the
    ///   last cause
    pub async fn fetch(&self, url: &str) -> FetchResult<String> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.attempt(url).await {
                Ok(body) => {
                    if attempt > 1 {
                        tracing::debug!("Fetched {} on attempt {}", url, attempt);
                    }
                    return Ok(body);
                }
                Err(e) => {
                    tracing::warn!("Attempt {} failed for {}: {}", attempt, url, e);

                    if attempt >= max_attempts {
                        return Err(FetchError::Exhausted {
                            url: url.to_string(),
                            attempts: attempt,
                            last: e,
                        });
                    }
                }
            }

            tokio::time::sleep(self.policy.backoff).await;
            attempt += 1;
        }
    }

    /// Performs a single GET request
    ///
    /// The response is dropped on a non-200 status, which releases the
    /// connection before the caller retries.
    async fn attempt(&self, url: &str) -> Result<String, AttemptError> {
        let response = self
            .client
            .get(url)
            .timeout(self.policy.request_timeout)
            .send()
            .await
            .map_err(AttemptError::from_send)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AttemptError::Status {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                AttemptError::Timeout(e)
            } else {
                AttemptError::Body(e)
            }
        })
    }
}

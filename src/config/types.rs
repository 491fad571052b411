use serde::Deserialize;
use std::time::Duration;

/// Output file used when neither the CLI nor the config names one
pub const DEFAULT_OUTPUT_PATH: &str = "scraped_results.json";

/// Main configuration structure for Page-Gleaner
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP fetch and retry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Timeout applied to each individual request attempt (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,

    /// Total number of attempts per URL, including the first one
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Fixed wait between two attempts (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl FetcherConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            max_attempts: 3,
            retry_backoff_ms: 2_000,
            user_agent: format!("page-gleaner/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Batch scheduling configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Maximum number of scrape tasks fetching at once (0 = unbounded)
    #[serde(rename = "max-concurrent-tasks")]
    pub max_concurrent_tasks: usize,
}

impl ScrapeConfig {
    /// Returns the concurrency cap, or `None` when tasks run unbounded
    pub fn concurrency_limit(&self) -> Option<usize> {
        (self.max_concurrent_tasks > 0).then_some(self.max_concurrent_tasks)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON results file
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

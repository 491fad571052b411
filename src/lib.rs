//! Page-Gleaner: a concurrent page metadata scraper
//!
//! This crate fetches a batch of web pages concurrently, extracts the title,
//! meta description and top-level headers of each page, and writes the
//! aggregated results to a JSON file. URLs that cannot be fetched or parsed
//! are skipped without failing the batch.

pub mod config;
pub mod input;
pub mod output;
pub mod scrape;

use thiserror::Error;

/// Main error type for Page-Gleaner operations
#[derive(Debug, Error)]
pub enum GleanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Aggregation error: {0}")]
    Aggregate(#[from] scrape::AggregateError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors in the user-supplied URL list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("No URLs provided")]
    Empty,
}

/// Failure of a single fetch attempt
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl AttemptError {
    /// Classifies a reqwest error raised while sending a request
    pub fn from_send(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error)
        } else {
            Self::Transport(error)
        }
    }
}

/// Terminal fetch errors, reported after the retry budget is spent
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch {url} after {attempts} attempts: {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        last: AttemptError,
    },
}

impl FetchError {
    /// The URL this error refers to
    pub fn url(&self) -> &str {
        match self {
            Self::Exhausted { url, .. } => url,
        }
    }
}

/// Errors raised while extracting fields from page markup
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Result type alias for Page-Gleaner operations
pub type Result<T> = std::result::Result<T, GleanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use input::parse_url_list;
pub use scrape::{BatchReport, Orchestrator, ResultSet, ScrapeResult};

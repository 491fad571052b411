//! Scrape module: the concurrent fetch-and-extract pipeline
//!
//! This module contains the core batch logic, including:
//! - HTTP fetching with a fixed per-attempt timeout and bounded retries
//! - Extraction of title, description and level-1 headers from HTML
//! - One scrape task per URL, skipping URLs that fail
//! - Aggregation of results produced by concurrently running tasks
//! - Orchestration of the dispatch and drain phases of a batch

mod aggregator;
mod extractor;
mod fetcher;
mod orchestrator;
mod result;
mod task;

pub use aggregator::{AggregateError, Aggregator, ResultSink};
pub use extractor::{extract, ExtractedPage};
pub use fetcher::{build_http_client, Fetcher, RetryPolicy};
pub use orchestrator::{BatchReport, Orchestrator};
pub use result::{ResultSet, ScrapeResult};
pub use task::{run_task, scrape_page, TaskOutcome};

use crate::config::Config;
use crate::GleanError;

/// Scrapes a batch of URLs with the given configuration
///
/// This is the main entry point for a batch. It builds the HTTP client,
/// runs one scrape task per URL, and returns the aggregated results once
/// every task has finished. Failing URLs are skipped, not reported as errors.
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `urls` - The URLs to scrape; surrounding whitespace is trimmed
///
/// # Returns
///
/// * `Ok(BatchReport)` - The results and batch statistics
/// * `Err(GleanError)` - The HTTP client could not be built or the
///   aggregator failed
pub async fn scrape_all<S: AsRef<str>>(
    config: &Config,
    urls: &[S],
) -> Result<BatchReport, GleanError> {
    let orchestrator = Orchestrator::from_config(config)?;
    orchestrator.run(urls).await
}

//! The per-URL unit of work
//!
//! A scrape task trims its URL, fetches the page, extracts its fields and
//! hands the result to the aggregator. Fetch and extraction failures are
//! terminal for that URL only: the task logs them and reports a skip.

use crate::scrape::aggregator::ResultSink;
use crate::scrape::extractor::extract;
use crate::scrape::fetcher::Fetcher;
use crate::scrape::result::ScrapeResult;
use crate::GleanError;

/// How a scrape task finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The page was scraped and its result handed to the aggregator
    Scraped { url: String },

    /// The URL was skipped; no result was produced
    Skipped { url: String, reason: String },
}

impl TaskOutcome {
    pub fn url(&self) -> &str {
        match self {
            Self::Scraped { url } | Self::Skipped { url, .. } => url,
        }
    }

    pub fn is_scraped(&self) -> bool {
        matches!(self, Self::Scraped { .. })
    }
}

/// Fetches and extracts a single page
///
/// # Returns
///
/// * `Ok(ScrapeResult)` - The page was fetched with HTTP 200 and extracted
/// * `Err(GleanError::Fetch)` - Every fetch attempt failed
/// * `Err(GleanError::Extract)` - The content could not be extracted
pub async fn scrape_page(fetcher: &Fetcher, url: &str) -> Result<ScrapeResult, GleanError> {
    let content = fetcher.fetch(url).await?;
    let page = extract(&content)?;
    Ok(ScrapeResult::new(url, page))
}

/// Runs one scrape task to completion
///
/// Always returns an outcome, whatever happened to the URL, so the caller
/// can count every dispatched task as done.
pub async fn run_task(fetcher: &Fetcher, url: &str, sink: &ResultSink) -> TaskOutcome {
    let url = url.trim();

    let result = match scrape_page(fetcher, url).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Skipping {}: {}", url, e);
            return TaskOutcome::Skipped {
                url: url.to_string(),
                reason: e.to_string(),
            };
        }
    };

    tracing::info!(
        "Scraped {} ({} header{})",
        url,
        result.headers.len(),
        if result.headers.len() == 1 { "" } else { "s" }
    );

    match sink.insert(result) {
        Ok(()) => TaskOutcome::Scraped {
            url: url.to_string(),
        },
        Err(e) => {
            tracing::error!("Skipping {}: {}", url, e);
            TaskOutcome::Skipped {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

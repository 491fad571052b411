//! Batch orchestration
//!
//! A batch runs in two phases:
//! - **Dispatch**: one scrape task per trimmed, non-empty URL is spawned into
//!   a `JoinSet`, optionally gated by a semaphore
//! - **Drain**: every task is joined, then the aggregator's intake is closed
//!   and the final result set is read
//!
//! No task failure aborts the batch; a panicking task is logged and counted.

use crate::config::Config;
use crate::output::BatchStatistics;
use crate::scrape::aggregator::Aggregator;
use crate::scrape::fetcher::Fetcher;
use crate::scrape::result::ResultSet;
use crate::scrape::task::{run_task, TaskOutcome};
use crate::GleanError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// The outcome of a whole batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Results of every successfully scraped URL, in completion order
    pub results: ResultSet,

    /// Counters and skipped URLs for diagnostics
    pub stats: BatchStatistics,
}

/// Runs batches of scrape tasks
pub struct Orchestrator {
    fetcher: Arc<Fetcher>,
    concurrency_limit: Option<usize>,
}

impl Orchestrator {
    /// Creates an orchestrator
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetcher shared by all tasks
    /// * `concurrency_limit` - Maximum number of tasks fetching at once;
    ///   `None` launches every task immediately
    pub fn new(fetcher: Fetcher, concurrency_limit: Option<usize>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            concurrency_limit: concurrency_limit.filter(|limit| *limit > 0),
        }
    }

    /// Creates an orchestrator from configuration
    pub fn from_config(config: &Config) -> Result<Self, GleanError> {
        let fetcher = Fetcher::from_config(&config.fetcher)?;
        Ok(Self::new(fetcher, config.scrape.concurrency_limit()))
    }

    pub fn concurrency_limit(&self) -> Option<usize> {
        self.concurrency_limit
    }

    /// Scrapes every URL and returns the aggregated results
    ///
    /// Waits for all tasks; there is no batch-wide timeout. The returned
    /// result set holds at most one entry per non-blank input URL.
    pub async fn run<S: AsRef<str>>(&self, urls: &[S]) -> Result<BatchReport, GleanError> {
        let start_time = Instant::now();
        let mut stats = BatchStatistics::default();

        let aggregator = Aggregator::new();
        let tasks = self.dispatch(urls, &aggregator, &mut stats);

        tracing::info!(
            "Dispatched {} scrape task{}{}",
            stats.dispatched,
            if stats.dispatched == 1 { "" } else { "s" },
            match self.concurrency_limit {
                Some(limit) => format!(" (at most {} at once)", limit),
                None => String::new(),
            }
        );

        Self::drain(tasks, &mut stats).await;

        // Every producer is done; closing the intake now cannot lose results
        let results = aggregator.finalize().await?;
        stats.elapsed = start_time.elapsed();

        tracing::info!(
            "Batch completed: {} scraped, {} skipped in {:?}",
            results.len(),
            stats.skipped_count(),
            stats.elapsed
        );

        Ok(BatchReport { results, stats })
    }

    /// Spawns one task per non-blank URL
    fn dispatch<S: AsRef<str>>(
        &self,
        urls: &[S],
        aggregator: &Aggregator,
        stats: &mut BatchStatistics,
    ) -> JoinSet<TaskOutcome> {
        let semaphore = self
            .concurrency_limit
            .map(|limit| Arc::new(Semaphore::new(limit)));
        let mut tasks = JoinSet::new();

        for raw in urls {
            let url = raw.as_ref().trim();
            if url.is_empty() {
                tracing::debug!("Ignoring blank URL");
                stats.blank_segments += 1;
                continue;
            }

            let url = url.to_string();
            let fetcher = Arc::clone(&self.fetcher);
            let sink = aggregator.sink();
            let semaphore = semaphore.clone();

            tasks.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                run_task(&fetcher, &url, &sink).await
            });
            stats.dispatched += 1;
        }

        tasks
    }

    /// Waits until every dispatched task has finished
    async fn drain(mut tasks: JoinSet<TaskOutcome>, stats: &mut BatchStatistics) {
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => stats.record(outcome),
                Err(e) => {
                    tracing::error!("Scrape task terminated abnormally: {}", e);
                    stats.aborted += 1;
                }
            }
        }
    }
}

//! Result aggregation for concurrently running scrape tasks
//!
//! The aggregator owns the result store inside a dedicated collector task.
//! Scrape tasks only hold [`ResultSink`] handles, which can insert but never
//! read. The store becomes readable through [`Aggregator::finalize`], which
//! consumes the aggregator, closes the intake and waits for the collector.

use crate::scrape::result::{ResultSet, ScrapeResult};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Errors raised by the aggregator
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("result intake is closed, dropped result for {url}")]
    SinkClosed { url: String },

    #[error("result collector failed: {0}")]
    CollectorFailed(String),
}

/// Insert-only handle given to each scrape task
#[derive(Debug, Clone)]
pub struct ResultSink {
    intake: mpsc::UnboundedSender<ScrapeResult>,
}

impl ResultSink {
    /// Hands a result over to the aggregator
    pub fn insert(&self, result: ScrapeResult) -> Result<(), AggregateError> {
        self.intake
            .send(result)
            .map_err(|rejected| AggregateError::SinkClosed { url: rejected.0.url })
    }
}

/// The single sink accumulating results of a batch
#[derive(Debug)]
pub struct Aggregator {
    intake: mpsc::UnboundedSender<ScrapeResult>,
    collector: JoinHandle<Vec<ScrapeResult>>,
}

impl Aggregator {
    /// Starts the collector task
    ///
    /// Must be called from within a tokio runtime.
    pub fn new() -> Self {
        let (intake, mut receiver) = mpsc::unbounded_channel::<ScrapeResult>();

        let collector = tokio::spawn(async move {
            let mut store = Vec::new();
            while let Some(result) = receiver.recv().await {
                tracing::debug!("Collected result for {}", result.url);
                store.push(result);
            }
            store
        });

        Self { intake, collector }
    }

    /// Returns a new insert handle for a producer
    pub fn sink(&self) -> ResultSink {
        ResultSink {
            intake: self.intake.clone(),
        }
    }

    /// Closes the intake and returns everything collected
    ///
    /// Only call once all producers are done: the collector keeps running
    /// until every [`ResultSink`] has been dropped.
    pub async fn finalize(self) -> Result<ResultSet, AggregateError> {
        drop(self.intake);

        self.collector
            .await
            .map(ResultSet::from)
            .map_err(|e| AggregateError::CollectorFailed(e.to_string()))
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

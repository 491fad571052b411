//! Batch statistics
//!
//! Counters collected by the orchestrator while draining a batch. Skipped
//! URLs never appear in the results file; they are only reported here.

use crate::scrape::TaskOutcome;
use std::time::Duration;

/// A URL that produced no result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUrl {
    pub url: String,
    pub reason: String,
}

/// Batch statistics summary
#[derive(Debug, Clone, Default)]
pub struct BatchStatistics {
    /// Number of scrape tasks spawned
    pub dispatched: usize,

    /// Number of tasks that produced a result
    pub scraped: usize,

    /// URLs skipped after a terminal fetch or extraction error
    pub skipped: Vec<SkippedUrl>,

    /// Tasks that panicked or were cancelled by the runtime
    pub aborted: usize,

    /// Input segments ignored because they were blank after trimming
    pub blank_segments: usize,

    /// Wall-clock time of the batch
    pub elapsed: Duration,
}

impl BatchStatistics {
    /// Records the outcome of a finished task
    pub fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Scraped { .. } => self.scraped += 1,
            TaskOutcome::Skipped { url, reason } => self.skipped.push(SkippedUrl { url, reason }),
        }
    }

    /// Number of dispatched tasks that produced no result
    pub fn skipped_count(&self) -> usize {
        self.skipped.len() + self.aborted
    }

    /// Returns the success rate as a percentage of dispatched tasks
    pub fn success_rate(&self) -> f64 {
        if self.dispatched == 0 {
            return 0.0;
        }
        (self.scraped as f64 / self.dispatched as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &BatchStatistics) {
    println!("=== Batch Statistics ===\n");

    println!("Overview:");
    println!("  URLs dispatched: {}", stats.dispatched);
    println!("  Pages scraped: {}", stats.scraped);
    println!("  URLs skipped: {}", stats.skipped_count());
    if stats.blank_segments > 0 {
        println!("  Blank entries ignored: {}", stats.blank_segments);
    }
    println!("  Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
    println!();

    if !stats.skipped.is_empty() {
        println!("Skipped URLs ({}):", stats.skipped.len());
        for skipped in &stats.skipped {
            println!("  - {}: {}", skipped.url, skipped.reason);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} URLs scraped)",
        stats.success_rate(),
        stats.scraped,
        stats.dispatched
    );
}

//! Output handler traits and types

use crate::scrape::ResultSet;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// An output handler receives the final result set once, after every scrape
/// task has finished.
pub trait OutputHandler {
    /// Persists the complete result set
    ///
    /// # Arguments
    ///
    /// * `results` - The final results of the batch
    fn write_results(&self, results: &ResultSet) -> OutputResult<()>;

    /// Human-readable description of where results go
    fn destination(&self) -> String;
}

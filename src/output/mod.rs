//! Output module for persisting batch results
//!
//! This module handles:
//! - Writing the result set as a pretty-printed JSON array
//! - Reading a results file back
//! - Recording and printing batch statistics

mod json;
pub mod stats;
mod traits;

pub use json::{load_results_json, write_results_json, JsonOutputHandler};
pub use stats::{print_statistics, BatchStatistics, SkippedUrl};
pub use traits::{OutputError, OutputHandler, OutputResult};

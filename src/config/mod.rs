//! Configuration module for Page-Gleaner
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a run without a file
//! uses `Config::default()`.
//!
//! # Example
//!
//! ```no_run
//! use page_gleaner::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("gleaner.toml")).unwrap();
//! println!("Fetch attempts per URL: {}", config.fetcher.max_attempts);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, OutputConfig, ScrapeConfig, DEFAULT_OUTPUT_PATH};

// Re-export parser functions
pub use parser::{compute_config_hash, hash_config, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses and validates TOML configuration text
///
/// Missing sections and keys fall back to their defaults, so an empty
/// string yields `Config::default()`.
///
/// # Example
///
/// ```
/// use page_gleaner::config::parse_config;
///
/// let config = parse_config("[fetcher]\nmax-attempts = 5\n").unwrap();
/// assert_eq!(config.fetcher.max_attempts, 5);
/// assert_eq!(config.output.path, "scraped_results.json");
/// ```
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 digest of configuration text
pub fn hash_config(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Loads, parses and validates the configuration file at `path`
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Hashes the configuration file at `path`
///
/// Logged at startup so a results file can be traced back to the settings
/// that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    Ok(hash_config(&std::fs::read_to_string(path)?))
}

/// Loads a configuration together with the hash of the exact text parsed
///
/// The file is read once, so the hash always matches the loaded settings.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!("Parsed configuration from {}", path.display());
    Ok((config, hash_config(&content)))
}

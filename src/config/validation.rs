use crate::config::types::{Config, FetcherConfig, OutputConfig, ScrapeConfig};
use crate::ConfigError;

/// Upper bound on the attempt budget per URL
const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Shortest per-attempt timeout accepted (milliseconds)
const MIN_REQUEST_TIMEOUT_MS: u64 = 100;

/// Longest wait between attempts accepted (milliseconds)
const MAX_RETRY_BACKOFF_MS: u64 = 60_000;

/// Upper bound on the concurrency cap
const MAX_CONCURRENT_TASKS_LIMIT: usize = 1_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_scrape_config(&config.scrape)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 || config.max_attempts > MAX_ATTEMPTS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be between 1 and {}, got {}",
            MAX_ATTEMPTS_LIMIT, config.max_attempts
        )));
    }

    if config.request_timeout_ms < MIN_REQUEST_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "request_timeout_ms must be >= {}ms, got {}ms",
            MIN_REQUEST_TIMEOUT_MS, config.request_timeout_ms
        )));
    }

    if config.retry_backoff_ms > MAX_RETRY_BACKOFF_MS {
        return Err(ConfigError::Validation(format!(
            "retry_backoff_ms must be <= {}ms, got {}ms",
            MAX_RETRY_BACKOFF_MS, config.retry_backoff_ms
        )));
    }

    validate_user_agent(&config.user_agent)?;

    Ok(())
}

/// Validates the User-Agent string: non-empty, no control characters
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user_agent must not contain control characters, got {:?}",
            user_agent
        )));
    }

    Ok(())
}

/// Validates scrape scheduling configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_tasks > MAX_CONCURRENT_TASKS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_tasks must be <= {} (0 = unbounded), got {}",
            MAX_CONCURRENT_TASKS_LIMIT, config.max_concurrent_tasks
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

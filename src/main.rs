//! Page-Gleaner main entry point
//!
//! This is the command-line interface for the Page-Gleaner scraper.

use anyhow::Context;
use clap::Parser;
use page_gleaner::config::{load_config_with_hash, validate, Config};
use page_gleaner::output::{print_statistics, JsonOutputHandler, OutputHandler};
use page_gleaner::input::UrlList;
use page_gleaner::{parse_url_list, Orchestrator};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Page-Gleaner: a concurrent page metadata scraper
///
/// Fetches every URL of a comma-separated list concurrently, extracts the
/// title, meta description and level-1 headers of each page, and writes the
/// results to a JSON file. URLs that cannot be fetched are skipped.
#[derive(Parser, Debug)]
#[command(name = "page-gleaner")]
#[command(version)]
#[command(about = "A concurrent page metadata scraper", long_about = None)]
struct Cli {
    /// Comma-separated URLs to scrape (prompted for when omitted)
    #[arg(short, long, value_name = "URLS")]
    urls: Option<String>,

    /// Output JSON file (prompted for when URLs are prompted for)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of pages fetched at once (0 = unbounded)
    #[arg(long, value_name = "N")]
    max_concurrent: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(limit) = cli.max_concurrent {
        config.scrape.max_concurrent_tasks = limit;
    }

    let interactive = cli.urls.is_none();
    let raw_urls = match cli.urls {
        Some(urls) => urls,
        None => prompt("Enter URLs to scrape (comma-separated):\n")?,
    };
    let url_list = parse_url_list(&raw_urls).context("No URLs provided, exiting")?;

    let output_path = match cli.output {
        Some(path) => path,
        None if interactive => {
            let answer = prompt(&format!(
                "Enter output filename (default: {}): ",
                config.output.path
            ))?;
            if answer.trim().is_empty() {
                PathBuf::from(&config.output.path)
            } else {
                PathBuf::from(answer.trim())
            }
        }
        None => PathBuf::from(&config.output.path),
    };
    config.output.path = output_path.display().to_string();

    validate(&config).context("Invalid configuration")?;

    handle_scrape(&config, &url_list, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_gleaner=info,warn"),
            1 => EnvFilter::new("page_gleaner=debug,info"),
            2 => EnvFilter::new("page_gleaner=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(io::stderr)
        .init();
}

/// Prints a prompt and reads one line from stdin
fn prompt(message: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(message.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

/// Runs the batch and writes the results file
async fn handle_scrape(config: &Config, urls: &UrlList, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Scraping {} URL{} (attempts: {}, timeout: {}ms, backoff: {}ms)",
        urls.len(),
        if urls.len() == 1 { "" } else { "s" },
        config.fetcher.max_attempts,
        config.fetcher.request_timeout_ms,
        config.fetcher.retry_backoff_ms
    );

    let orchestrator =
        Orchestrator::from_config(config).context("Failed to initialize HTTP client")?;
    let report = orchestrator.run(urls.segments()).await?;

    let handler = JsonOutputHandler::new(&config.output.path);
    if let Err(e) = handler.write_results(&report.results) {
        tracing::error!("Failed to write results to file: {}", e);
        return Err(e).context("Failed to write results to file");
    }

    if !quiet {
        print_statistics(&report.stats);
        println!();
        println!(
            "✓ Scraping completed. Results written to {}",
            handler.destination()
        );
    }

    Ok(())
}

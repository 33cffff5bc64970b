//! # China News Scraper
//!
//! Fetches the section pages of Chinese English-language news sites, extracts
//! their headlines into uniform article records and merges them into one
//! ordered JSON feed.
//!
//! ## Features
//!
//! - Built-in layouts for Global Times and CGTN section pages
//! - Source list configurable through a YAML file
//! - Sources fetched concurrently; a failing source never stops the others
//! - One-shot CLI output (stdout and optional timestamped JSON file)
//! - HTTP endpoint that runs an aggregation per request
//!
//! ## Usage
//!
//! ```sh
//! china_news_scraper scrape -j ./output
//! china_news_scraper serve --bind 0.0.0.0:8000
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: load and validate the source list once
//! 2. **Fetching**: download every source page concurrently
//! 3. **Extraction**: turn each page into article records with its layout
//! 4. **Aggregation**: merge records in source order, keep per-source status
//! 5. **Output**: JSON on stdout / disk, or over HTTP

use chrono::Local;
use clap::Parser;
use itertools::Itertools;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod server;
mod utils;

use aggregator::{AggregationReport, Aggregator, SourceOutcome};
use cli::{Cli, Command};
use config::SourceRegistry;
use error::AggregateError;
use fetch::{Fetch, HttpFetcher};
use outputs::json;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr: stdout carries the JSON feed) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("china_news_scraper starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.command, "Parsed CLI arguments");

    let sources = SourceRegistry::load(args.config.as_deref())
        .await
        .map_err(AggregateError::from)?;
    let fetcher = HttpFetcher::new(Duration::from_secs(args.fetch_timeout_secs))?;
    let aggregator = Arc::new(Aggregator::new(Arc::new(sources), fetcher));

    match args.command {
        Command::Scrape { json_output_dir } => {
            scrape(&*aggregator, json_output_dir.as_deref()).await
        }
        Command::Serve { bind } => server::serve(&bind, aggregator).await,
    }
}

/// Run one aggregation, print it, and optionally keep a copy on disk.
#[instrument(level = "info", skip(aggregator))]
async fn scrape<F: Fetch>(
    aggregator: &Aggregator<F>,
    json_output_dir: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    let started_at = Local::now();

    // Early check: fail before scraping if the output dir is unusable
    if let Some(dir) = json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let report = match aggregator.run().await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "No articles could be scraped");
            return Err(e.into());
        }
    };
    log_summary(aggregator.sources(), &report);

    println!("{}", serde_json::to_string_pretty(&report.articles)?);

    if let Some(dir) = json_output_dir {
        if let Err(e) = json::write_articles(&report.articles, dir, &started_at).await {
            error!(error = %e, "Failed to write JSON output");
            return Err(e);
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Log per-source and per-content-type article counts.
fn log_summary(sources: &SourceRegistry, report: &AggregationReport) {
    for status in &report.sources {
        match &status.outcome {
            SourceOutcome::Succeeded { articles } => {
                info!(source = %status.source_name, articles, "Source scraped")
            }
            SourceOutcome::Failed { reason } => {
                warn!(source = %status.source_name, %reason, "Source failed")
            }
        }
    }

    let by_type = report.articles.iter().counts_by(|a| a.content_type);
    for (content_type, count) in by_type.into_iter().sorted_by_key(|(_, count)| *count).rev() {
        info!(?content_type, count, "Content type distribution");
    }

    if report.is_partial_failure() {
        warn!(
            failed = report.failures().count(),
            sources = sources.len(),
            "Partial failure: some sources failed"
        );
    }
    info!(total = report.articles.len(), "Scraped articles summary");
}

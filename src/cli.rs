//! Command-line interface definitions.
//!
//! Arguments can be provided via command-line flags or environment variables.

use clap::{Parser, Subcommand};

/// Command-line arguments for the news scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape once and print the articles as JSON
/// china_news_scraper scrape
///
/// # Also keep a timestamped copy on disk
/// china_news_scraper scrape -j ./output
///
/// # Custom source list, served over HTTP
/// china_news_scraper --config sources.yaml serve --bind 127.0.0.1:8000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML file listing the news sources
    #[arg(short, long, env = "NEWS_SOURCES_CONFIG", global = true)]
    pub config: Option<String>,

    /// Per-request timeout when fetching a source page, in seconds
    #[arg(long, env = "NEWS_FETCH_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub fetch_timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run one aggregation and print the articles as a JSON array
    Scrape {
        /// Directory to also write a timestamped JSON file into
        #[arg(short, long)]
        json_output_dir: Option<String>,
    },
    /// Serve aggregations over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "NEWS_BIND_ADDR", default_value = "0.0.0.0:8000")]
        bind: String,
    },
}

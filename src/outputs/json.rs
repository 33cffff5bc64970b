//! JSON output of an aggregated run.
//!
//! Each run writes one timestamped file so earlier results are never
//! overwritten:
//!
//! ```text
//! json_output_dir/
//! ├── chinese_news_20250506_081500.json
//! └── chinese_news_20250506_201500.json
//! ```
//!
//! The file holds the article records as a pretty-printed JSON array, with
//! non-ASCII text written as-is.

use crate::models::ArticleRecord;
use chrono::{DateTime, TimeZone};
use std::error::Error;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// File name for a run started at `at`.
pub fn output_filename<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("chinese_news_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Serialize `articles` into `json_output_dir` and return the written path.
///
/// # Errors
///
/// Fails if the directory cannot be created or the file cannot be written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, count = articles.len()))]
pub async fn write_articles<Tz>(
    articles: &[ArticleRecord],
    json_output_dir: &str,
    at: &DateTime<Tz>,
) -> Result<PathBuf, Box<dyn Error>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let json = serde_json::to_string_pretty(articles)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = Path::new(json_output_dir).join(output_filename(at));
    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote articles JSON");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;
    use crate::scrapers::Extractor;
    use chrono::Utc;

    #[test]
    fn test_output_filename() {
        let at = Utc.with_ymd_and_hms(2025, 5, 6, 8, 15, 0).unwrap();
        assert_eq!(output_filename(&at), "chinese_news_20250506_081500.json");
    }

    #[tokio::test]
    async fn test_write_articles_round_trips() {
        let dir = std::env::temp_dir().join(format!("cns_json_{}", std::process::id()));
        let dir_str = dir.to_str().unwrap().to_string();
        let source = SourceConfig::new("CGTN China", "https://www.cgtn.com/china", Extractor::Cgtn);
        let articles = vec![ArticleRecord::new(
            &source,
            "新闻 headline".to_string(),
            Some("https://news.cgtn.com/a.html".to_string()),
            None,
            None,
        )];
        let at = Utc.with_ymd_and_hms(2025, 5, 6, 20, 15, 0).unwrap();

        let path = write_articles(&articles, &dir_str, &at).await.unwrap();

        assert_eq!(path, dir.join("chinese_news_20250506_201500.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("新闻 headline"));
        let parsed: Vec<ArticleRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, articles);
        let _ = std::fs::remove_dir_all(&dir);
    }
}

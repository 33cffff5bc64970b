//! Utility functions for text cleanup, date recognition and file system checks.
//!
//! - Whitespace normalization for text pulled out of markup
//! - Recognition of the absolute date formats the news sites print
//! - String truncation for logging
//! - File system validation for output directories

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace (including newlines and tabs) into a
/// single space and trim both ends.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  China's\n\tnew  satellite "), "China's new satellite");
/// ```
pub fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Absolute date patterns, tried in order, with the `chrono` format that
/// parses the matched text.
static DATE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\d{4}-\d{2}-\d{2}", "%Y-%m-%d"),
        (r"\d{2}/\d{2}/\d{4}", "%d/%m/%Y"),
        (r"[A-Za-z]+\.? \d{1,2}, \d{4}", "%B %d, %Y"),
        (r"\d{2}-\d{2}-\d{4}", "%d-%m-%Y"),
        (r"\d{1,2} [A-Za-z]+ \d{4}", "%d %B %Y"),
        (r"\d{4}年\d{1,2}月\d{1,2}日", "%Y年%m月%d日"),
    ]
    .into_iter()
    .map(|(pattern, format)| (Regex::new(pattern).unwrap(), format))
    .collect()
});

/// Recognise an absolute calendar date inside `raw` and render it as
/// `YYYY-MM-DDT00:00:00`.
///
/// Relative expressions ("3 hours ago", "yesterday") are not resolved, so the
/// result depends on the input text only.
pub fn normalize_date(raw: &str) -> Option<String> {
    DATE_PATTERNS.iter().find_map(|(pattern, format)| {
        let found = pattern.find(raw)?;
        let text = found.as_str().replace('.', "");
        NaiveDate::parse_from_str(&text, format)
            .ok()
            .map(|date| date.format("%Y-%m-%dT00:00:00").to_string())
    })
}

/// Turn the date text shown on a page into the `published_at` value of a
/// record: normalized when recognised, the cleaned text otherwise, `None`
/// when there is no text at all.
pub fn published_at(raw: &str) -> Option<String> {
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        return None;
    }
    Some(normalize_date(&cleaned).unwrap_or(cleaned))
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary)
/// with an ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

//! Data models shared by the fetcher, the extractors and the aggregator.
//!
//! - [`RawPage`]: unparsed page content for one source, handed to an extractor
//! - [`ArticleRecord`]: one article pulled out of a page, the unit of output
//!
//! Records serialize as flat JSON objects so that an aggregated run can be
//! returned directly as a JSON array.

use crate::config::{ContentType, SourceConfig};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Page content returned by the fetch collaborator.
///
/// Lives only for the duration of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// Final url of the page after redirects. Relative links resolve against it.
    pub url: String,
    /// Value of the `Content-Type` response header, when the server sent one.
    pub content_type: Option<String>,
    /// Decoded page text.
    pub body: String,
}

#[cfg(test)]
impl RawPage {
    /// An HTML page served from `url`.
    pub fn html(url: &str, body: &str) -> Self {
        Self {
            url: url.to_string(),
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.to_string(),
        }
    }
}

/// One article extracted from a source page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Headline text, whitespace-collapsed.
    pub title: String,
    /// Absolute link to the article.
    pub url: Option<String>,
    /// Publication date: ISO-8601 when recognised, otherwise the text shown on the page.
    pub published_at: Option<String>,
    /// Name of the configured source. Never taken from page content.
    pub source_name: String,
    pub content_type: ContentType,
    pub language: String,
    /// Teaser image shown next to the headline.
    pub image_url: Option<String>,
    /// Hex SHA-256 of title, url and source name.
    pub hash: String,
}

impl ArticleRecord {
    /// Build a record for `source`, filling the source-derived fields and the hash.
    pub fn new(
        source: &SourceConfig,
        title: String,
        url: Option<String>,
        published_at: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        let hash = article_hash(&title, url.as_deref(), &source.name);
        Self {
            title,
            url,
            published_at,
            source_name: source.name.clone(),
            content_type: source.content_type,
            language: source.language.clone(),
            image_url,
            hash,
        }
    }
}

/// Stable identifier for an article, independent of when it was scraped.
pub fn article_hash(title: &str, url: Option<&str>, source_name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(url.unwrap_or_default().as_bytes());
    hasher.update(source_name.as_bytes());
    format!("{:x}", hasher.finalize())
}

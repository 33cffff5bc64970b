//! Error types for fetching, extraction, configuration and aggregation.
//!
//! Per-source errors ([`FetchError`], [`ParseError`], wrapped together as
//! [`SourceError`]) are captured by the aggregator and never escape a run.
//! Only [`AggregateError`] reaches the caller.

use thiserror::Error;

/// The fetch collaborator could not deliver page content for a source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or redirect failure.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be read or decoded as text.
    #[error("could not read body of {url}: {reason}")]
    Body { url: String, reason: String },
}

/// A fetched page could not be interpreted by its extractor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("page is empty")]
    EmptyPage,

    #[error("page is not an HTML document (content type {content_type})")]
    NotHtml { content_type: String },

    /// The page exists but lacks the element that identifies the site layout.
    #[error("expected page landmark `{selector}` is missing; the site layout may have changed")]
    MissingLandmark { selector: &'static str },
}

/// Failure of one source during a run.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Parse(#[from] ParseError),
}

/// Problems with the configured source set, detected before any fetch.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no news sources are configured")]
    Empty,

    #[error("source name `{0}` is configured more than once")]
    DuplicateName(String),

    #[error("source name must not be blank")]
    BlankName,

    #[error("source `{name}` has an invalid url `{url}`: {reason}")]
    InvalidUrl {
        name: String,
        url: String,
        reason: String,
    },

    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Run-level failure surfaced to the caller of an aggregation.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("invalid source configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// Every configured source failed; carries `(source_name, reason)` pairs.
    #[error("all {} news sources failed: {}", .failures.len(), summarize(.failures))]
    Exhausted { failures: Vec<(String, String)> },
}

fn summarize(failures: &[(String, String)]) -> String {
    failures
        .iter()
        .map(|(name, reason)| format!("{name}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_message_lists_every_source() {
        let err = AggregateError::Exhausted {
            failures: vec![
                ("CGTN".to_string(), "HTTP 503".to_string()),
                ("Global Times".to_string(), "page is empty".to_string()),
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("all 2 news sources failed"));
        assert!(msg.contains("CGTN: HTTP 503"));
        assert!(msg.contains("Global Times: page is empty"));
    }

    #[test]
    fn test_source_error_wraps_parse_error() {
        let err: SourceError = ParseError::EmptyPage.into();
        assert_eq!(err.to_string(), "extraction failed: page is empty");
    }

    #[test]
    fn test_configuration_error_from_config_error() {
        let err: AggregateError = ConfigError::Empty.into();
        assert!(matches!(err, AggregateError::Configuration(ConfigError::Empty)));
    }
}

//! News source configuration.
//!
//! The set of sources is loaded once at startup, validated, and then shared
//! read-only (behind an `Arc`) by every aggregation run. Sources come either
//! from the built-in list in [`SourceRegistry::builtin`] or from a YAML file:
//!
//! ```yaml
//! sources:
//!   - name: Global Times
//!     url: https://www.globaltimes.cn/
//!     extractor: global_times
//!   - name: CGTN China
//!     url: https://www.cgtn.com/china
//!     extractor: cgtn
//!     language: en
//! ```

use crate::error::ConfigError;
use crate::scrapers::Extractor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, instrument};
use url::Url;

/// Broad kind of content a source publishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    News,
    Social,
    Blog,
}

/// One configured news source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Unique display name, copied into every record from this source.
    pub name: String,
    /// Page fetched on each run.
    pub url: String,
    /// Markup layout used to pull articles out of the page.
    pub extractor: Extractor,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl SourceConfig {
    pub fn new(name: &str, url: &str, extractor: Extractor) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            extractor,
            content_type: ContentType::News,
            language: default_language(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    sources: Vec<SourceConfig>,
}

/// Validated, ordered, non-empty list of sources.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<SourceConfig>,
}

impl SourceRegistry {
    /// Validate `sources` and wrap them.
    ///
    /// Fails on an empty list, blank or duplicated names, and urls that are
    /// not absolute `http`/`https` links.
    pub fn new(sources: Vec<SourceConfig>) -> Result<Self, ConfigError> {
        if sources.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen = HashSet::new();
        for source in &sources {
            if source.name.trim().is_empty() {
                return Err(ConfigError::BlankName);
            }
            if !seen.insert(source.name.as_str()) {
                return Err(ConfigError::DuplicateName(source.name.clone()));
            }
            validate_url(source)?;
        }

        Ok(Self { sources })
    }

    /// The sites this crate ships layouts for.
    pub fn builtin() -> Self {
        Self {
            sources: vec![
                SourceConfig::new(
                    "Global Times",
                    "https://www.globaltimes.cn/",
                    Extractor::GlobalTimes,
                ),
                SourceConfig::new("CGTN", "https://www.cgtn.com/sci-tech", Extractor::Cgtn),
                SourceConfig::new("CGTN China", "https://www.cgtn.com/china", Extractor::Cgtn),
            ],
        }
    }

    /// Parse and validate a YAML source list.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        Self::new(file.sources)
    }

    /// Load the YAML file at `path`, or the built-in list when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let registry = match path {
            Some(path) => {
                let yaml = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| ConfigError::Io {
                        path: path.to_string(),
                        source,
                    })?;
                Self::from_yaml(&yaml)?
            }
            None => Self::builtin(),
        };
        info!(
            count = registry.len(),
            names = ?registry.names().collect::<Vec<_>>(),
            "Loaded news sources"
        );
        Ok(registry)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SourceConfig> {
        self.sources.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }
}

fn validate_url(source: &SourceConfig) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        name: source.name.clone(),
        url: source.url.clone(),
        reason,
    };
    let parsed = Url::parse(&source.url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sources_are_valid() {
        let builtin = SourceRegistry::builtin();
        let revalidated = SourceRegistry::new(builtin.iter().cloned().collect()).unwrap();
        assert_eq!(
            revalidated.names().collect::<Vec<_>>(),
            vec!["Global Times", "CGTN", "CGTN China"]
        );
    }

    #[test]
    fn test_empty_source_list_is_rejected() {
        assert!(matches!(SourceRegistry::new(vec![]), Err(ConfigError::Empty)));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let sources = vec![
            SourceConfig::new("CGTN", "https://www.cgtn.com/china", Extractor::Cgtn),
            SourceConfig::new("CGTN", "https://www.cgtn.com/sci-tech", Extractor::Cgtn),
        ];
        match SourceRegistry::new(sources) {
            Err(ConfigError::DuplicateName(name)) => assert_eq!(name, "CGTN"),
            other => panic!("expected duplicate name error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let sources = vec![SourceConfig::new(" ", "https://www.cgtn.com/", Extractor::Cgtn)];
        assert!(matches!(SourceRegistry::new(sources), Err(ConfigError::BlankName)));
    }

    #[test]
    fn test_relative_and_non_http_urls_are_rejected() {
        for url in ["/china", "ftp://www.cgtn.com/china", "not a url"] {
            let sources = vec![SourceConfig::new("CGTN", url, Extractor::Cgtn)];
            assert!(
                matches!(SourceRegistry::new(sources), Err(ConfigError::InvalidUrl { .. })),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_yaml_applies_defaults() {
        let yaml = r#"
sources:
  - name: Global Times
    url: https://www.globaltimes.cn/
    extractor: global_times
  - name: CGTN Blog
    url: https://www.cgtn.com/opinions
    extractor: cgtn
    content_type: blog
    language: zh
"#;
        let registry = SourceRegistry::from_yaml(yaml).unwrap();
        let sources: Vec<_> = registry.iter().collect();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].extractor, Extractor::GlobalTimes);
        assert_eq!(sources[0].content_type, ContentType::News);
        assert_eq!(sources[0].language, "en");
        assert_eq!(sources[1].content_type, ContentType::Blog);
        assert_eq!(sources[1].language, "zh");
    }

    #[test]
    fn test_from_yaml_rejects_unknown_extractor() {
        let yaml = r#"
sources:
  - name: Xinhua
    url: https://english.news.cn/
    extractor: xinhua
"#;
        assert!(matches!(SourceRegistry::from_yaml(yaml), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_example_config_matches_builtin() {
        let example = SourceRegistry::from_yaml(include_str!("../sources.example.yaml")).unwrap();
        let builtin = SourceRegistry::builtin();
        assert!(example.iter().eq(builtin.iter()));
    }

    #[test]
    fn test_from_yaml_rejects_empty_list() {
        assert!(matches!(
            SourceRegistry::from_yaml("sources: []"),
            Err(ConfigError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_load_without_path_uses_builtin() {
        let registry = SourceRegistry::load(None).await.unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let err = SourceRegistry::load(Some("/definitely/not/here.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

//! Article extraction from fetched news pages.
//!
//! Every configured source names one [`Extractor`] variant. A variant is a
//! static [`Layout`]: a handful of CSS selectors describing where a site puts
//! its headlines, dates and teaser images on a section page.
//!
//! # Supported Layouts
//!
//! | Variant | Module | Pages |
//! |---------|--------|-------|
//! | `global_times` | [`globaltimes`] | Global Times homepage |
//! | `cgtn` | [`cgtn`] | CGTN section pages (sci-tech, china, ...) |
//!
//! # Contract
//!
//! Extraction is a pure function of the page: no I/O and no clock. Each
//! headline link yields its own [`ArticleRecord`], in document order. A page
//! without headlines is a valid, empty result; a page that cannot be the
//! expected site at all (empty, not HTML, site landmark missing) is a
//! [`ParseError`].

pub mod cgtn;
pub mod globaltimes;

use crate::config::SourceConfig;
use crate::error::ParseError;
use crate::models::{ArticleRecord, RawPage};
use crate::utils::{clean_text, published_at};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

/// Extraction logic for one family of site layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extractor {
    GlobalTimes,
    Cgtn,
}

impl Extractor {
    fn layout(self) -> &'static Layout {
        match self {
            Extractor::GlobalTimes => &*globaltimes::LAYOUT,
            Extractor::Cgtn => &*cgtn::LAYOUT,
        }
    }

    /// Pull every article out of `page`, attributing them to `source`.
    #[instrument(level = "debug", skip_all, fields(source = %source.name, extractor = ?self))]
    pub fn extract(
        self,
        page: &RawPage,
        source: &SourceConfig,
    ) -> Result<Vec<ArticleRecord>, ParseError> {
        check_page(page)?;

        let layout = self.layout();
        let document = Html::parse_document(&page.body);
        if document.select(&layout.landmark).next().is_none() {
            return Err(ParseError::MissingLandmark {
                selector: layout.landmark_css,
            });
        }

        let base = Url::parse(&page.url)
            .or_else(|_| Url::parse(&source.url))
            .ok();

        let records: Vec<ArticleRecord> = document
            .select(&layout.headline)
            .filter_map(|anchor| layout.record(anchor, base.as_ref(), source))
            .collect();

        debug!(count = records.len(), url = %page.url, "Extracted articles");
        Ok(records)
    }
}

/// Selectors describing one site's section page.
pub struct Layout {
    landmark_css: &'static str,
    /// Element every genuine page of the site carries.
    landmark: Selector,
    /// Links whose text is an article headline.
    headline: Selector,
    /// Classes of the listing element wrapping one article, most preferred first.
    containers: &'static [&'static str],
    date: Selector,
    image: Selector,
}

impl Layout {
    /// Compile a layout. The selectors are compile-time constants, so an
    /// invalid one is a programming error.
    fn new(
        landmark: &'static str,
        headline: &'static str,
        containers: &'static [&'static str],
        date: &'static str,
        image: &'static str,
    ) -> Self {
        Self {
            landmark_css: landmark,
            landmark: css(landmark),
            headline: css(headline),
            containers,
            date: css(date),
            image: css(image),
        }
    }

    fn record(
        &self,
        anchor: ElementRef<'_>,
        base: Option<&Url>,
        source: &SourceConfig,
    ) -> Option<ArticleRecord> {
        let title = clean_text(&anchor.text().collect::<String>());
        if title.is_empty() {
            return None;
        }

        let url = anchor
            .value()
            .attr("href")
            .and_then(|href| resolve(base, href));

        // A bare headline has no listing element of its own, so no date or image.
        let container = self.container_of(anchor);
        let published = container.and_then(|container| {
            container
                .select(&self.date)
                .next()
                .and_then(|el| match el.value().attr("datetime") {
                    Some(datetime) => published_at(datetime),
                    None => published_at(&el.text().collect::<String>()),
                })
        });
        let image_url = container.and_then(|container| {
            container.select(&self.image).find_map(|img| {
                let value = img.value();
                value
                    .attr("data-original")
                    .or_else(|| value.attr("data-src"))
                    .or_else(|| value.attr("src"))
                    .and_then(|src| resolve(base, src))
            })
        });

        Some(ArticleRecord::new(source, title, url, published, image_url))
    }

    /// Listing element an anchor belongs to: the nearest ancestor carrying the
    /// most preferred container class.
    fn container_of<'a>(&self, anchor: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.containers.iter().find_map(|class| {
            anchor
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().classes().any(|c| c == *class))
        })
    }
}

fn css(selector: &'static str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| panic!("invalid selector `{selector}`: {e:?}"))
}

fn check_page(page: &RawPage) -> Result<(), ParseError> {
    if page.body.trim().is_empty() {
        return Err(ParseError::EmptyPage);
    }
    if let Some(content_type) = &page.content_type {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence != "text/html" && essence != "application/xhtml+xml" {
            return Err(ParseError::NotHtml {
                content_type: content_type.clone(),
            });
        }
    }
    Ok(())
}

/// Resolve a link found on the page into an absolute http(s) url.
fn resolve(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let resolved = match base {
        Some(base) => base.join(href).ok()?,
        None => Url::parse(href).ok()?,
    };
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

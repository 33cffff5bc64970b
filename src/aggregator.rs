//! Aggregation of every configured source into one ordered article list.
//!
//! A run walks each source through `Fetching → Extracting → Accumulated |
//! SourceFailed`. Sources are processed concurrently; `join_all` returns their
//! outcomes in configuration order, so the merged list is ordered by source
//! position no matter which fetch finishes first. A failing source is logged
//! and recorded in the report; it never stops the others.

use crate::config::{SourceConfig, SourceRegistry};
use crate::error::{AggregateError, SourceError};
use crate::fetch::Fetch;
use crate::models::ArticleRecord;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

/// How one source fared during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Succeeded { articles: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStatus {
    pub source_name: String,
    #[serde(flatten)]
    pub outcome: SourceOutcome,
}

/// Result of a run that at least partly succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct AggregationReport {
    /// Records of all successful sources, in configured source order.
    pub articles: Vec<ArticleRecord>,
    /// One entry per configured source, in configured order.
    pub sources: Vec<SourceStatus>,
}

impl AggregationReport {
    /// True when some source failed while others succeeded.
    pub fn is_partial_failure(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceStatus> {
        self.sources
            .iter()
            .filter(|s| matches!(s.outcome, SourceOutcome::Failed { .. }))
    }
}

/// Drives fetch and extraction across a [`SourceRegistry`].
#[derive(Debug)]
pub struct Aggregator<F> {
    sources: Arc<SourceRegistry>,
    fetcher: F,
}

impl<F: Fetch> Aggregator<F> {
    pub fn new(sources: Arc<SourceRegistry>, fetcher: F) -> Self {
        Self { sources, fetcher }
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// Run one aggregation over every configured source.
    ///
    /// # Errors
    ///
    /// - [`AggregateError::Exhausted`] when every source failed to fetch or parse.
    ///
    /// An empty source set cannot reach this point: [`SourceRegistry`] rejects
    /// it with a configuration error at load time.
    #[instrument(level = "info", skip_all, fields(sources = self.sources.len()))]
    pub async fn run(&self) -> Result<AggregationReport, AggregateError> {
        let t0 = Instant::now();

        let outcomes = join_all(self.sources.iter().map(|source| self.process(source))).await;

        let mut articles = Vec::new();
        let mut statuses = Vec::with_capacity(outcomes.len());
        for (source, outcome) in self.sources.iter().zip(outcomes) {
            let outcome = match outcome {
                Ok(records) => {
                    let count = records.len();
                    articles.extend(records);
                    SourceOutcome::Succeeded { articles: count }
                }
                Err(e) => SourceOutcome::Failed {
                    reason: e.to_string(),
                },
            };
            statuses.push(SourceStatus {
                source_name: source.name.clone(),
                outcome,
            });
        }

        let report = AggregationReport {
            articles,
            sources: statuses,
        };
        let failed = report.failures().count();

        if failed == report.sources.len() {
            let failures = report
                .sources
                .into_iter()
                .filter_map(|status| match status.outcome {
                    SourceOutcome::Failed { reason } => Some((status.source_name, reason)),
                    SourceOutcome::Succeeded { .. } => None,
                })
                .collect::<Vec<_>>();
            error!(failed, "Every news source failed");
            return Err(AggregateError::Exhausted { failures });
        }

        info!(
            articles = report.articles.len(),
            failed,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Aggregation complete"
        );
        Ok(report)
    }

    /// Fetch and extract a single source.
    #[instrument(level = "info", skip_all, fields(source = %source.name))]
    async fn process(&self, source: &SourceConfig) -> Result<Vec<ArticleRecord>, SourceError> {
        let page = self.fetcher.fetch(&source.url).await.inspect_err(|e| {
            warn!(url = %source.url, error = %e, "Fetch failed; skipping source");
        })?;

        let records = source.extractor.extract(&page, source).inspect_err(|e| {
            warn!(
                url = %page.url,
                error = %e,
                preview = %crate::utils::truncate_for_log(&page.body, 200),
                "Could not interpret page; skipping source"
            );
        })?;

        info!(count = records.len(), "Extracted source articles");
        Ok(records)
    }
}

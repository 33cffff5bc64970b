//! HTTP interface.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /health` | `ok` |
//! | `GET /scrape-news` | JSON array of article records |
//! | `GET /scrape-news/report` | records plus per-source status |
//!
//! Every scrape request triggers a fresh aggregation run. When the run fails
//! as a whole the response is HTTP 500 with `{"detail": "<message>"}`.

use crate::aggregator::Aggregator;
use crate::error::AggregateError;
use crate::fetch::Fetch;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info};

pub fn router<F>(aggregator: Arc<Aggregator<F>>) -> Router
where
    F: Fetch + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/scrape-news", get(scrape_news::<F>))
        .route("/scrape-news/report", get(scrape_news_report::<F>))
        .with_state(aggregator)
}

/// Bind `addr` and serve [`router`] until the process is stopped.
pub async fn serve<F>(addr: &str, aggregator: Arc<Aggregator<F>>) -> Result<(), Box<dyn Error>>
where
    F: Fetch + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "News scraper listening");
    axum::serve(listener, router(aggregator)).await?;
    Ok(())
}

async fn scrape_news<F>(State(aggregator): State<Arc<Aggregator<F>>>) -> Response
where
    F: Fetch + Send + Sync + 'static,
{
    match aggregator.run().await {
        Ok(report) => Json(report.articles).into_response(),
        Err(e) => run_failed(e),
    }
}

async fn scrape_news_report<F>(State(aggregator): State<Arc<Aggregator<F>>>) -> Response
where
    F: Fetch + Send + Sync + 'static,
{
    match aggregator.run().await {
        Ok(report) => Json(report).into_response(),
        Err(e) => run_failed(e),
    }
}

fn run_failed(e: AggregateError) -> Response {
    error!(error = %e, "Scrape request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": e.to_string() })),
    )
        .into_response()
}

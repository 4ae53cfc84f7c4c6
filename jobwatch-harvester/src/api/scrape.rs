//! Scrape API Handler
//!
//! Harvests one listing page per request and returns the normalized jobs.

use axum::{
    Json,
    extract::{Query, State},
};
use jobwatch_core::Category;
use jobwatch_core::dto::scrape::{ScrapeQuery, ScrapeResponse};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::service::harvest_service::Harvester;

/// GET /api/scrape-jobs
/// Scrape the listing page for the first requested category
pub async fn scrape_jobs(
    State(harvester): State<Arc<Harvester>>,
    Query(query): Query<ScrapeQuery>,
) -> ApiResult<Json<ScrapeResponse>> {
    let category = requested_category(&query);
    let country = query.primary_country();

    tracing::debug!(
        "Scrape requested: category={}, country={:?}",
        category,
        country
    );

    let jobs = harvester
        .harvest(category, country)
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(Json(ScrapeResponse::ok(jobs)))
}

/// First requested category; missing or unknown keys fall back to the default
fn requested_category(query: &ScrapeQuery) -> Category {
    match query.primary_category() {
        Some(key) => key.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, using {}", e, Category::default());
            Category::default()
        }),
        None => Category::default(),
    }
}

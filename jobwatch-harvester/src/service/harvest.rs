//! Harvest Service
//!
//! Business logic for turning one upstream listing page into jobs.

use chrono::Utc;
use jobwatch_core::{Category, Job, Normalizer};
use std::sync::Arc;
use url::Url;

use crate::extract::extract_jobs;
use crate::repository::PageRepository;

/// Service error type
#[derive(Debug)]
pub enum HarvestError {
    /// The upstream page could not be loaded
    Fetch(anyhow::Error),
    /// The page loaded but could not be processed
    Extract(anyhow::Error),
}

impl std::fmt::Display for HarvestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarvestError::Fetch(e) => write!(f, "failed to load listing page: {:#}", e),
            HarvestError::Extract(e) => write!(f, "failed to extract listings: {:#}", e),
        }
    }
}

/// Scrapes the listing page of one category
pub struct Harvester {
    pages: Arc<dyn PageRepository>,
    upstream_url: Url,
    normalizer: Normalizer,
}

impl Harvester {
    pub fn new(pages: Arc<dyn PageRepository>, upstream_url: Url) -> Self {
        let normalizer = Normalizer::new(upstream_url.clone());
        Self {
            pages,
            upstream_url,
            normalizer,
        }
    }

    /// Fetches and normalizes the listing page for `category`, optionally
    /// narrowed to one country
    pub async fn harvest(
        &self,
        category: Category,
        country: Option<&str>,
    ) -> Result<Vec<Job>, HarvestError> {
        let url = listing_url(&self.upstream_url, category, country);
        tracing::info!("Fetching listing page: {}", url);

        let html = self
            .pages
            .fetch_page(&url)
            .await
            .map_err(HarvestError::Fetch)?;

        let jobs = extract_jobs(&html, &self.normalizer, category, Utc::now())
            .map_err(HarvestError::Extract)?;

        tracing::info!("Found {} job(s) for category {}", jobs.len(), category);

        Ok(jobs)
    }
}

/// Listing page URL for a category and optional country
pub fn listing_url(upstream: &Url, category: Category, country: Option<&str>) -> Url {
    let mut url = upstream.clone();
    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("language", "pt")
            .append_pair("category", category.upstream_slug());
        if let Some(country) = country {
            query.append_pair("country", &country.to_lowercase());
        }
    }
    url
}

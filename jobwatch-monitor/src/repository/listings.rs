//! Listings repository
//!
//! Fetches freshly normalized jobs from the harvester.

use anyhow::{Context, Result};
use async_trait::async_trait;
use jobwatch_client::HarvesterClient;
use jobwatch_core::{Category, Job};

/// Repository trait for live listing data
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches the current listings of `category`
    ///
    /// Any transport, status or decoding failure is an error; callers fall
    /// back to synthetic data.
    async fn fetch_candidates(&self, category: Category, countries: &[String]) -> Result<Vec<Job>>;
}

/// HTTP implementation of ListingSource
pub struct HttpListingSource {
    client: HarvesterClient,
}

impl HttpListingSource {
    pub fn new(client: HarvesterClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch_candidates(&self, category: Category, countries: &[String]) -> Result<Vec<Job>> {
        self.client
            .scrape_jobs(&[category], countries)
            .await
            .with_context(|| format!("Failed to fetch listings from {}", self.client.base_url()))
    }
}


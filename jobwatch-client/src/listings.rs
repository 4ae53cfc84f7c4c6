//! Listing endpoints

use crate::HarvesterClient;
use crate::error::{ClientError, Result};
use jobwatch_core::dto::scrape::ScrapeResponse;
use jobwatch_core::{Category, Job};
use tracing::debug;

impl HarvesterClient {
    // =============================================================================
    // Scraping
    // =============================================================================

    /// Ask the harvester to scrape the listing page
    ///
    /// # Arguments
    /// * `categories` - Category keys; the harvester scrapes the first one
    /// * `countries` - Country codes; the harvester narrows by the first one
    ///
    /// # Returns
    /// The normalized jobs found on the page. A response with
    /// `success == false` is an error, even when its status code is 2xx.
    pub async fn scrape_jobs(&self, categories: &[Category], countries: &[String]) -> Result<Vec<Job>> {
        let url = format!("{}/api/scrape-jobs", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&scrape_query(categories, countries))
            .send()
            .await?;

        let body: ScrapeResponse = self.handle_response(response).await?;
        let jobs = accept(body)?;

        debug!("Harvester returned {} job(s)", jobs.len());
        Ok(jobs)
    }
}

/// Query pairs for `GET /api/scrape-jobs`
fn scrape_query(categories: &[Category], countries: &[String]) -> Vec<(&'static str, String)> {
    let categories = categories
        .iter()
        .map(|category| category.key())
        .collect::<Vec<_>>()
        .join(",");
    let countries = countries
        .iter()
        .map(|code| code.to_lowercase())
        .collect::<Vec<_>>()
        .join(",");

    vec![("categories", categories), ("countries", countries)]
}

fn accept(body: ScrapeResponse) -> Result<Vec<Job>> {
    if !body.success {
        return Err(ClientError::ScrapeFailed(
            body.error.unwrap_or_else(|| "no reason given".to_string()),
        ));
    }
    Ok(body.jobs)
}

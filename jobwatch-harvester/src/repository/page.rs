//! Listing page repository
//!
//! Fetches raw listing-page HTML from the marketplace. This is a stateless
//! HTTP client; extraction is handled by the service layer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Repository trait for reading upstream pages
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Fetches the HTML body at `url`
    ///
    /// Fails on transport errors, timeouts and non-success status codes.
    async fn fetch_page(&self, url: &Url) -> Result<String>;
}

/// HTTP implementation of PageRepository
pub struct HttpPageRepository {
    client: Client,
}

impl HttpPageRepository {
    /// Creates a new HTTP page repository
    ///
    /// # Arguments
    /// * `user_agent` - User agent sent with every request
    /// * `timeout` - Upper bound for a whole page load
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageRepository for HttpPageRepository {
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9")
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        response
            .text()
            .await
            .context("Failed to read response body")
    }
}

//! Jobwatch HTTP Client
//!
//! A small, type-safe HTTP client for the Jobwatch harvester API.
//!
//! The monitor uses it to request freshly normalized listings and to check
//! that the harvester is reachable.
//!
//! # Example
//!
//! ```no_run
//! use jobwatch_client::HarvesterClient;
//! use jobwatch_core::Category;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = HarvesterClient::new("http://localhost:4000");
//!
//!     let jobs = client
//!         .scrape_jobs(&[Category::ItProgramming], &["BR".to_string()])
//!         .await?;
//!
//!     println!("Harvested {} job(s)", jobs.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod health;
mod listings;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use jobwatch_core::dto::health::HealthResponse;
pub use jobwatch_core::dto::scrape::ScrapeResponse;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the harvester API
#[derive(Debug, Clone)]
pub struct HarvesterClient {
    /// Base URL of the harvester (e.g., "http://localhost:4000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HarvesterClient {
    /// Create a new harvester client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the harvester API (e.g., "http://localhost:4000")
    ///
    /// # Example
    /// ```
    /// use jobwatch_client::HarvesterClient;
    ///
    /// let client = HarvesterClient::new("http://localhost:4000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new harvester client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use jobwatch_client::HarvesterClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = HarvesterClient::with_client("http://localhost:4000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Get the base URL of the harvester
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

//! Health endpoint

use crate::HarvesterClient;
use crate::error::Result;
use jobwatch_core::dto::health::HealthResponse;

impl HarvesterClient {
    /// Check that the harvester is up
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}

//! Harvester health check

use anyhow::Result;
use colored::*;
use jobwatch_client::HarvesterClient;

pub async fn run(client: &HarvesterClient) -> Result<()> {
    match client.health().await {
        Ok(health) => {
            println!(
                "{} {} ({})",
                "✓".green(),
                client.base_url().bold(),
                health.message
            );
            Ok(())
        }
        Err(e) => {
            println!("{} {} is not reachable", "✗".red(), client.base_url().bold());
            Err(e.into())
        }
    }
}

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod extract;
pub mod repository;
pub mod service;

use config::Config;
use repository::HttpPageRepository;
use service::harvest_service::Harvester;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobwatch_harvester=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Jobwatch Harvester...");

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Upstream listing page: {}", config.upstream_url);

    let pages = HttpPageRepository::new(&config.user_agent, config.fetch_timeout)?;
    let harvester = Arc::new(Harvester::new(Arc::new(pages), config.upstream_url.clone()));

    // Build router with all API endpoints
    let app = api::create_router(harvester);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}

//! API Module
//!
//! HTTP API layer for the harvester.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod health;
pub mod scrape;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::harvest_service::Harvester;

/// Create the main API router with all endpoints
pub fn create_router(harvester: Arc<Harvester>) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health::health_check))
        // Listing endpoints
        .route("/api/scrape-jobs", get(scrape::scrape_jobs))
        // Add state and middleware
        .with_state(harvester)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

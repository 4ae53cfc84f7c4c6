//! Health Check API Handler
//!
//! Simple health check endpoint for monitoring.

use axum::Json;
use jobwatch_core::dto::health::HealthResponse;

/// GET /api/health
/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Harvester is running".to_string(),
    })
}

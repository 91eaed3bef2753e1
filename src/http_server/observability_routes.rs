//! Observability HTTP Routes
//!
//! Liveness endpoint, outside the contacts contract.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{on, MethodFilter},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::contacts_routes::method_not_allowed;

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Health check route at `/health`
pub fn health_routes(started: Instant) -> Router {
    Router::new()
        .route(
            "/health",
            on(MethodFilter::GET, health_handler).fallback(method_not_allowed),
        )
        .with_state(Arc::new(started))
}

async fn health_handler(State(started): State<Arc<Instant>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: started.elapsed().as_secs(),
    };

    (StatusCode::OK, Json(response))
}

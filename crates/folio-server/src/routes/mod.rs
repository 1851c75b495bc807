//! Route configuration for the Folio API server.

mod content;
mod health;
mod leetcode;
mod metrics;

pub use health::{HealthMemory, HealthReport};
pub use metrics::{MetricsReport, SystemInfo};

use crate::error::panic_response;
use crate::middleware::{
    CorsConfig, CorsLayer, LoggingLayer, MetricsLayer, SecurityHeadersLayer,
};
use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    // Outermost first. CORS sits innermost so preflights still pass
    // through request ids, security headers, logging and metrics.
    let common_middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SecurityHeadersLayer::new(config.security.secure_headers))
        .layer(LoggingLayer::new())
        .layer(MetricsLayer::new(Arc::clone(&state.metrics)))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(CorsLayer::new(CorsConfig::for_origin(&config.app.public_url)));

    Router::new()
        .route("/api/content", get(content::bundle))
        .route("/api/content/:section", get(content::section))
        .route("/api/health", get(health::health))
        .route("/api/metrics", get(metrics::metrics))
        .route("/api/leetcode", get(leetcode::stats))
        .fallback(fallback_handler)
        .layer(common_middleware)
        .with_state(state)
}

async fn fallback_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "not_found",
            "message": "The requested resource was not found"
        })),
    )
}

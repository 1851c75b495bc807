//! Middleware for the Folio API server.

pub mod cors;
pub mod logging;
pub mod metrics;
pub mod security;

pub use cors::{CorsConfig, CorsLayer, CorsMiddleware};
pub use logging::{LoggingLayer, LoggingMiddleware, SLOW_REQUEST_THRESHOLD};
pub use metrics::{MetricsLayer, MetricsMiddleware};
pub use security::{SecurityHeaders, SecurityHeadersLayer};

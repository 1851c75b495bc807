//! Error response implementation.

use super::types::ApiError;
use crate::response::cache::NO_CACHE;
use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use std::error::Error as _;
use tracing::{error, warn};

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(
                error = %self,
                source = ?self.source().map(ToString::to_string),
                code = self.error_code(),
                "Server error occurred"
            );
        } else {
            warn!(error = %self, code = self.error_code(), "Request failed");
        }

        let status = self.status_code();
        let timestamp = chrono::Utc::now().to_rfc3339();

        // Bodies never include internal error detail beyond what the
        // variant message already says.
        let body = match &self {
            ApiError::ContentUnavailable(_) => json!({ "error": "Failed to load content" }),
            ApiError::UnknownSection(_) | ApiError::SectionUnavailable { .. } => json!({
                "error": self.to_string(),
                "code": self.error_code(),
            }),
            ApiError::Unhealthy(message) => json!({
                "status": "unhealthy",
                "timestamp": timestamp,
                "error": message,
            }),
            ApiError::MetricsUnavailable(message) => json!({
                "status": "error",
                "timestamp": timestamp,
                "error": message,
            }),
            ApiError::Internal(_) => json!({ "error": "Internal server error" }),
        };

        let mut response = (status, Json(body)).into_response();

        if status.is_server_error() {
            response
                .headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
        }

        response
    }
}

/// Turn a handler panic into the generic 500 body.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(anyhow::anyhow!("handler panicked: {message}")).into_response()
}

//! API error types.

use axum::http::StatusCode;
use folio_content::{AggregationError, Section};
use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures a handler can surface to the caller.
///
/// Recoverable conditions (a single broken section in the bundle, an
/// unreachable stats API) never become an `ApiError`; they degrade the
/// response instead.
#[derive(Debug, Error)]
pub enum ApiError {
    // 404 Not Found
    #[error("Unknown content section: {0}")]
    UnknownSection(String),

    #[error("Content section {section} is unavailable")]
    SectionUnavailable {
        section: Section,
        kind: &'static str,
    },

    // 500 Internal Server Error
    #[error("Failed to load content")]
    ContentUnavailable(#[source] AggregationError),

    #[error("Health check failed: {0}")]
    Unhealthy(String),

    #[error("Metrics collection failed: {0}")]
    MetricsUnavailable(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownSection(_) | Self::SectionUnavailable { .. } => StatusCode::NOT_FOUND,

            Self::ContentUnavailable(_)
            | Self::Unhealthy(_)
            | Self::MetricsUnavailable(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSection(_) => "unknown_section",
            Self::SectionUnavailable { kind, .. } => *kind,
            Self::ContentUnavailable(_) => "content_unavailable",
            Self::Unhealthy(_) => "unhealthy",
            Self::MetricsUnavailable(_) => "metrics_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Check if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<AggregationError> for ApiError {
    fn from(err: AggregationError) -> Self {
        Self::ContentUnavailable(err)
    }
}

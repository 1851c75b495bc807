use crate::error::{ApiError, ApiResult};
use crate::monitoring::ProcessMemory;
use crate::response::{CachePolicy, Cached};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    /// Seconds since the server started.
    pub uptime: f64,
    pub version: String,
    pub environment: &'static str,
    pub memory: HealthMemory,
    pub pid: u32,
}

/// Megabytes.
#[derive(Debug, Serialize)]
pub struct HealthMemory {
    pub used: u64,
    pub total: u64,
    pub external: u64,
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> ApiResult<Cached<Json<HealthReport>>> {
    let start = Instant::now();

    let memory = ProcessMemory::sample()
        .map_err(|e| ApiError::Unhealthy(format!("failed to read process memory: {e}")))?;

    let report = HealthReport {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: state.metrics.uptime().as_secs_f64(),
        version: state.config.app.version.clone(),
        environment: state.config.mode().as_str(),
        memory: HealthMemory {
            used: memory.used,
            total: memory.total,
            external: memory.external,
        },
        pid: std::process::id(),
    };

    info!(
        response_time_ms = start.elapsed().as_millis() as u64,
        status = report.status,
        "Health check requested"
    );

    Ok(Cached(CachePolicy::NoStore, Json(report)))
}

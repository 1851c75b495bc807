use crate::error::{ApiError, ApiResult};
use crate::monitoring::ProcessMemory;
use crate::response::{CachePolicy, Cached};
use crate::state::AppState;
use axum::{extract::State, Json};
use folio_common_metrics::{ErrorStats, RequestCounts, UptimeInfo};
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Payload of `GET /api/metrics`.
#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub timestamp: String,
    pub version: String,
    pub environment: &'static str,
    pub uptime: UptimeInfo,
    pub requests: RequestCounts,
    pub performance: Performance,
    pub errors: ErrorStats,
    pub system: SystemInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub response_time: ResponseTime,
    pub memory: MemoryReport,
}

/// Milliseconds; `average` is rounded to the nearest whole millisecond.
#[derive(Debug, Serialize)]
pub struct ResponseTime {
    pub total: u64,
    pub count: u64,
    pub average: u64,
}

#[derive(Debug, Serialize)]
pub struct MemoryReport {
    pub peak: u64,
    pub current: u64,
    pub system: ProcessMemory,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub runtime_version: &'static str,
    pub platform: &'static str,
    pub arch: &'static str,
    pub pid: u32,
}

impl SystemInfo {
    pub fn current() -> Self {
        Self {
            runtime_version: env!("FOLIO_RUSTC_VERSION"),
            platform: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            pid: std::process::id(),
        }
    }
}

/// `GET /api/metrics`
pub async fn metrics(State(state): State<AppState>) -> ApiResult<Cached<Json<MetricsReport>>> {
    let start = Instant::now();

    let system_memory = ProcessMemory::sample()
        .map_err(|e| ApiError::MetricsUnavailable(format!("failed to read process memory: {e}")))?;
    let snapshot = state.metrics.snapshot();

    let report = MetricsReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: state.config.app.version.clone(),
        environment: state.config.mode().as_str(),
        uptime: snapshot.uptime,
        requests: snapshot.requests,
        performance: Performance {
            response_time: ResponseTime {
                total: snapshot.response_time.total_ms,
                count: snapshot.response_time.count,
                average: snapshot.response_time.average_ms.round() as u64,
            },
            memory: MemoryReport {
                peak: snapshot.memory.peak_mb,
                current: snapshot.memory.current_mb,
                system: system_memory,
            },
        },
        errors: snapshot.errors,
        system: SystemInfo::current(),
    };

    info!(
        response_time_ms = start.elapsed().as_millis() as u64,
        "Metrics requested"
    );

    Ok(Cached(CachePolicy::NoStore, Json(report)))
}

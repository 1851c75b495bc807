//! Process-wide request metrics for Folio.
//!
//! A single [`MetricsState`] lives for the whole process, shared by every
//! request handler behind an `Arc`. Counters are plain atomics so concurrent
//! handlers never lose increments; nothing is persisted and everything starts
//! from zero on restart.
//!
//! ```rust
//! use folio_common_metrics::MetricsState;
//!
//! let metrics = MetricsState::new();
//! metrics.record_request(true);
//! metrics.record_response_time(120);
//! metrics.record_error("parse_failure");
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.requests.total, 1);
//! assert_eq!(snapshot.errors.by_type["parse_failure"], 1);
//! ```

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// A monotonically increasing counter.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment by a value.
    pub fn inc_by(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// Get the current value.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// A value that can be overwritten, with a high-water variant.
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicU64,
}

impl Gauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value.
    pub fn set(&self, v: u64) {
        self.value.store(v, Ordering::Relaxed);
    }

    /// Raise the value to `v` if it is larger.
    pub fn set_max(&self, v: u64) {
        self.value.fetch_max(v, Ordering::Relaxed);
    }

    /// Get the current value.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Counters shared by the whole server process.
#[derive(Debug)]
pub struct MetricsState {
    requests_total: Counter,
    requests_successful: Counter,
    requests_failed: Counter,
    response_time_total_ms: Counter,
    response_time_count: Counter,
    errors_total: Counter,
    errors_by_type: Mutex<BTreeMap<String, u64>>,
    memory_current_mb: Gauge,
    memory_peak_mb: Gauge,
    started: Instant,
    started_at: DateTime<Utc>,
}

impl MetricsState {
    /// Create counters with the process start taken as now.
    pub fn new() -> Self {
        Self {
            requests_total: Counter::new(),
            requests_successful: Counter::new(),
            requests_failed: Counter::new(),
            response_time_total_ms: Counter::new(),
            response_time_count: Counter::new(),
            errors_total: Counter::new(),
            errors_by_type: Mutex::new(BTreeMap::new()),
            memory_current_mb: Gauge::new(),
            memory_peak_mb: Gauge::new(),
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Count one request as successful or failed.
    pub fn record_request(&self, success: bool) {
        self.requests_total.inc();
        if success {
            self.requests_successful.inc();
        } else {
            self.requests_failed.inc();
        }
    }

    /// Add one response time sample, in milliseconds.
    pub fn record_response_time(&self, ms: u64) {
        self.response_time_total_ms.inc_by(ms);
        self.response_time_count.inc();
    }

    /// Count one error of the given kind.
    pub fn record_error(&self, kind: &str) {
        self.errors_total.inc();
        *self.errors_by_type.lock().entry(kind.to_string()).or_insert(0) += 1;
    }

    /// Record the current memory use, tracking the peak.
    pub fn record_memory(&self, current_mb: u64) {
        self.memory_current_mb.set(current_mb);
        self.memory_peak_mb.set_max(current_mb);
    }

    /// Time since the counters were created.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// When the counters were created.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Read-only view with derived fields.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.requests_total.get();
        let successful = self.requests_successful.get();
        let failed = self.requests_failed.get();

        let success_rate = if total > 0 {
            ((successful as f64 / total as f64) * 100.0).round() as u64
        } else {
            0
        };

        let rt_total = self.response_time_total_ms.get();
        let rt_count = self.response_time_count.get();
        let average_ms = if rt_count > 0 {
            rt_total as f64 / rt_count as f64
        } else {
            0.0
        };

        let uptime = self.uptime();

        MetricsSnapshot {
            requests: RequestCounts {
                total,
                successful,
                failed,
                success_rate,
            },
            response_time: ResponseTimeStats {
                total_ms: rt_total,
                count: rt_count,
                average_ms,
            },
            errors: ErrorStats {
                total: self.errors_total.get(),
                by_type: self.errors_by_type.lock().clone(),
            },
            memory: MemoryStats {
                peak_mb: self.memory_peak_mb.get(),
                current_mb: self.memory_current_mb.get(),
            },
            uptime: UptimeInfo {
                seconds: uptime.as_secs(),
                formatted: format_uptime(uptime),
            },
            started_at: self.started_at,
        }
    }
}

impl Default for MetricsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`MetricsState`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub requests: RequestCounts,
    pub response_time: ResponseTimeStats,
    pub errors: ErrorStats,
    pub memory: MemoryStats,
    pub uptime: UptimeInfo,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCounts {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    /// Rounded percentage of successful requests; 0 when nothing was recorded.
    pub success_rate: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTimeStats {
    #[serde(rename = "total")]
    pub total_ms: u64,
    pub count: u64,
    #[serde(rename = "average")]
    pub average_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorStats {
    pub total: u64,
    pub by_type: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryStats {
    #[serde(rename = "peak")]
    pub peak_mb: u64,
    #[serde(rename = "current")]
    pub current_mb: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UptimeInfo {
    pub seconds: u64,
    pub formatted: String,
}

/// Format an elapsed duration with the largest non-zero unit leading,
/// e.g. `1d 1h 1m 1s`, `3h 0m 5s`, `2m 0s` or `42s`.
pub fn format_uptime(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours % 24, minutes % 60, seconds % 60)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

use crate::response::Cached;
use crate::services::{LeetCodeStats, StatsSource};
use crate::state::AppState;
use axum::{extract::State, Json};

/// `GET /api/leetcode`: always 200, falling back to static stats.
pub async fn stats(State(state): State<AppState>) -> Cached<Json<LeetCodeStats>> {
    let (stats, source) = state.leetcode.stats().await;

    if source == StatsSource::Fallback {
        state.metrics.record_error("upstream_unavailable");
    }

    Cached(state.cache_policy(), Json(stats))
}

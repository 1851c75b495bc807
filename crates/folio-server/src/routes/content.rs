//! Content endpoints.

use crate::error::{ApiError, ApiResult};
use crate::response::Cached;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use folio_content::{ContentBundle, Section};
use serde_json::Value;

/// `GET /api/content`: every section, with `null` for those that failed.
pub async fn bundle(State(state): State<AppState>) -> ApiResult<Cached<Json<ContentBundle>>> {
    let report = state.aggregator.report().await?;

    for failure in report.failures() {
        state.metrics.record_error(failure.kind());
    }

    Ok(Cached(state.cache_policy(), Json(report.into_bundle())))
}

/// `GET /api/content/:section`, by bundle key or file stem.
pub async fn section(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Cached<Json<Value>>> {
    let section: Section = name
        .parse()
        .map_err(|_| ApiError::UnknownSection(name.clone()))?;

    match state.aggregator.section(section).await? {
        Ok(value) => Ok(Cached(state.cache_policy(), Json(value))),
        Err(e) => {
            state.metrics.record_error(e.kind());
            Err(ApiError::SectionUnavailable {
                section,
                kind: e.kind(),
            })
        }
    }
}

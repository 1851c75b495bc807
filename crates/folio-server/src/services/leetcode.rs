//! LeetCode stats pass-through.

use crate::config::LeetCodeConfig;
use folio_common_http::{HttpClient, HttpConfig, HttpError, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Normalised stats as served by `/api/leetcode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeStats {
    pub total_solved: u64,
    pub total_questions: u64,
    pub acceptance_rate: String,
    pub ranking: u64,
    pub contribution_points: u64,
    pub reputation: u64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
}

impl LeetCodeStats {
    /// Static payload served whenever the upstream cannot be used.
    pub fn fallback() -> Self {
        Self {
            total_solved: 1250,
            total_questions: 2800,
            acceptance_rate: "90%+".to_string(),
            ranking: 50000,
            contribution_points: 100,
            reputation: 100,
            easy_solved: 400,
            medium_solved: 700,
            hard_solved: 150,
        }
    }
}

/// Upstream payload. Every field is optional and missing ones count as
/// zero. Counts are read as floats so one odd value cannot sink the
/// whole payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamStats {
    total_solved: Option<f64>,
    total_questions: Option<f64>,
    acceptance_rate: Option<f64>,
    ranking: Option<f64>,
    contribution_points: Option<f64>,
    reputation: Option<f64>,
    easy_solved: Option<f64>,
    medium_solved: Option<f64>,
    hard_solved: Option<f64>,
}

/// Missing, negative and non-finite counts become zero; fractions truncate.
fn count(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v as u64,
        _ => 0,
    }
}

impl From<UpstreamStats> for LeetCodeStats {
    fn from(raw: UpstreamStats) -> Self {
        Self {
            total_solved: count(raw.total_solved),
            total_questions: count(raw.total_questions),
            acceptance_rate: format!("{:.2}%", raw.acceptance_rate.unwrap_or(0.0)),
            ranking: count(raw.ranking),
            contribution_points: count(raw.contribution_points),
            reputation: count(raw.reputation),
            easy_solved: count(raw.easy_solved),
            medium_solved: count(raw.medium_solved),
            hard_solved: count(raw.hard_solved),
        }
    }
}

#[derive(Debug, Error)]
pub enum LeetCodeError {
    #[error("no LeetCode username configured")]
    NoUsername,

    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Where a stats payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    Live,
    /// The upstream was asked and failed.
    Fallback,
    /// No username is configured, so the upstream is never asked.
    Unconfigured,
}

/// Client for the public LeetCode stats API.
#[derive(Debug, Clone)]
pub struct LeetCodeService {
    http: HttpClient,
    request: RequestBuilder,
    username: String,
}

impl LeetCodeService {
    pub fn new(config: &LeetCodeConfig) -> Result<Self, HttpError> {
        let http = HttpClient::with_config(&HttpConfig::with_timeout(config.timeout()))?;
        let request = RequestBuilder::new()
            .base_url(config.base_url.clone())
            .accept_json();

        let username = config.username.trim().to_string();
        if username.is_empty() {
            info!("No LeetCode username configured, /api/leetcode serves static stats");
        }

        Ok(Self {
            http,
            request,
            username,
        })
    }

    /// Fetch and normalise live stats.
    pub async fn fetch(&self) -> Result<LeetCodeStats, LeetCodeError> {
        if self.username.is_empty() {
            return Err(LeetCodeError::NoUsername);
        }

        let raw: UpstreamStats = self.http.get_json(&self.request, &self.username).await?;
        debug!(username = %self.username, "Fetched LeetCode stats");
        Ok(raw.into())
    }

    /// Live stats, or the fallback payload on any failure.
    pub async fn stats(&self) -> (LeetCodeStats, StatsSource) {
        match self.fetch().await {
            Ok(stats) => (stats, StatsSource::Live),
            Err(LeetCodeError::NoUsername) => {
                debug!("LeetCode username unset, serving fallback");
                (LeetCodeStats::fallback(), StatsSource::Unconfigured)
            }
            Err(e) => {
                warn!(error = %e, "LeetCode stats unavailable, serving fallback");
                (LeetCodeStats::fallback(), StatsSource::Fallback)
            }
        }
    }
}

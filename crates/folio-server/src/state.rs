//! Shared handler state.

use crate::config::ServerConfig;
use crate::response::CachePolicy;
use crate::services::LeetCodeService;
use folio_common_metrics::MetricsState;
use folio_content::ContentAggregator;
use std::sync::Arc;

/// State shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub aggregator: ContentAggregator,
    pub metrics: Arc<MetricsState>,
    pub leetcode: LeetCodeService,
}

impl AppState {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let aggregator = ContentAggregator::from_dir(config.content.dir.clone());
        let leetcode = LeetCodeService::new(&config.leetcode)?;

        Ok(Self {
            config: Arc::new(config),
            aggregator,
            metrics: Arc::new(MetricsState::new()),
            leetcode,
        })
    }

    /// Cache policy for content and stats responses.
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy::for_mode(self.config.mode())
    }
}

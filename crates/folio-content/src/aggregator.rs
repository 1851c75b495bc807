//! Whole-site content assembly.

use crate::bundle::ContentBundle;
use crate::error::{AggregationError, SectionError};
use crate::loader::{ContentLoader, SectionResult};
use crate::section::Section;
use futures::future::join_all;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Result of loading one section during aggregation.
#[derive(Debug)]
pub struct SectionOutcome {
    pub section: Section,
    pub result: SectionResult,
}

/// Per-section results of a full load, in catalogue order.
#[derive(Debug)]
pub struct LoadReport {
    outcomes: Vec<SectionOutcome>,
}

impl LoadReport {
    pub fn outcomes(&self) -> &[SectionOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = &SectionError> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }

    pub fn loaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn bundle(&self) -> ContentBundle {
        self.outcomes
            .iter()
            .map(|o| (o.section, o.result.as_ref().ok().cloned()))
            .collect()
    }

    pub fn into_bundle(self) -> ContentBundle {
        self.outcomes
            .into_iter()
            .map(|o| (o.section, o.result.ok()))
            .collect()
    }
}

/// Loads every section and combines them into one bundle.
#[derive(Clone)]
pub struct ContentAggregator {
    loader: ContentLoader,
}

impl ContentAggregator {
    pub fn new(loader: ContentLoader) -> Self {
        Self { loader }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(ContentLoader::from_dir(dir))
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Load every section concurrently.
    ///
    /// Fails only when the store itself cannot be reached; individual
    /// section failures are carried in the report.
    pub async fn report(&self) -> Result<LoadReport, AggregationError> {
        let source = self.loader.source();
        if let Err(e) = source.probe().await {
            error!(store = %source.describe(), error = %e, "Content store unreachable");
            return Err(AggregationError::StoreUnreachable(e));
        }

        let outcomes = join_all(Section::ALL.into_iter().map(|section| async move {
            SectionOutcome {
                section,
                result: self.loader.load(section).await,
            }
        }))
        .await;

        let report = LoadReport { outcomes };
        if report.is_clean() {
            debug!(sections = report.loaded(), "Content aggregated");
        } else {
            info!(
                loaded = report.loaded(),
                failed = Section::ALL.len() - report.loaded(),
                "Content aggregated with missing sections"
            );
        }
        Ok(report)
    }

    /// Load every section and return the combined bundle.
    pub async fn assemble(&self) -> Result<ContentBundle, AggregationError> {
        self.report().await.map(LoadReport::into_bundle)
    }

    /// Load a single section.
    pub async fn section(&self, section: Section) -> Result<SectionResult, AggregationError> {
        let source = self.loader.source();
        source
            .probe()
            .await
            .map_err(AggregationError::StoreUnreachable)?;
        Ok(self.loader.load(section).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_test_utils::ContentFixture;

    #[tokio::test]
    async fn test_complete_store() {
        let fixture = ContentFixture::complete();
        let aggregator = ContentAggregator::from_dir(fixture.path());

        let report = aggregator.report().await.unwrap();
        assert!(report.is_clean());
        assert_eq!(report.loaded(), 12);

        let bundle = report.into_bundle();
        assert!(bundle.is_complete());
        assert_eq!(bundle.text_at(Section::ResumeChat, "/title"), Some("resume-chat"));
    }

    #[tokio::test]
    async fn test_report_order_matches_catalogue() {
        let fixture = ContentFixture::complete();
        let report = ContentAggregator::from_dir(fixture.path())
            .report()
            .await
            .unwrap();

        let order: Vec<Section> = report.outcomes().iter().map(|o| o.section).collect();
        assert_eq!(order, Section::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_section_lookup() {
        let fixture = ContentFixture::complete();
        let aggregator = ContentAggregator::from_dir(fixture.path());

        let result = aggregator.section(Section::Achievements).await.unwrap();
        assert_eq!(result.unwrap()["title"], "achievements");
    }
}

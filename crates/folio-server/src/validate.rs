//! Offline content check used by the `validate` subcommand.

use folio_content::{AggregationError, ContentAggregator, LoadReport};
use std::path::{Path, PathBuf};

/// Outcome of loading every section from a content directory.
#[derive(Debug)]
pub struct ContentValidation {
    dir: PathBuf,
    result: Result<LoadReport, AggregationError>,
}

impl ContentValidation {
    /// Load every section through the same aggregator the API uses.
    pub async fn run(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let result = ContentAggregator::from_dir(dir.clone()).report().await;
        Self { dir, result }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn report(&self) -> Option<&LoadReport> {
        self.result.as_ref().ok()
    }

    /// True only when the directory is reachable and every section loaded.
    pub fn is_valid(&self) -> bool {
        matches!(&self.result, Ok(report) if report.is_clean())
    }

    pub fn failure_count(&self) -> usize {
        match &self.result {
            Ok(report) => report.failures().count(),
            Err(_) => folio_content::Section::ALL.len(),
        }
    }

    /// One line per section, or a single line when the store is unreachable.
    pub fn lines(&self) -> Vec<String> {
        let report = match &self.result {
            Ok(report) => report,
            Err(e) => return vec![format!("error   {}: {e}", self.dir.display())],
        };

        report
            .outcomes()
            .iter()
            .map(|outcome| {
                let file = outcome.section.file_name();
                match &outcome.result {
                    Ok(_) => format!("ok      {file}"),
                    Err(e) => format!("{:<7} {file}: {} ({e})", "fail", e.kind()),
                }
            })
            .collect()
    }
}

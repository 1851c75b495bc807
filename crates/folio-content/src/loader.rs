//! Single-section loading.

use crate::convert::yaml_to_json;
use crate::error::SectionError;
use crate::schema::check_shape;
use crate::section::Section;
use crate::source::{ContentSource, FsContentSource};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Parsed section data, or the reason it is missing.
pub type SectionResult = Result<Value, SectionError>;

/// Reads and parses one section at a time.
///
/// `load` never returns early with a panic or an I/O error of its own: every
/// failure is folded into the [`SectionError`] for that section and logged.
#[derive(Clone)]
pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
}

impl ContentLoader {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Loader over a directory of `.yml` files.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FsContentSource::new(dir)))
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    pub async fn load(&self, section: Section) -> SectionResult {
        let result = self.try_load(section).await;
        match &result {
            Ok(_) => debug!(section = %section, "Loaded content section"),
            Err(e) => warn!(
                section = %section,
                kind = e.kind(),
                error = %e,
                "Content section unavailable"
            ),
        }
        result
    }

    async fn try_load(&self, section: Section) -> SectionResult {
        let raw = self
            .source
            .read(section)
            .await
            .map_err(|source| SectionError::Unavailable { section, source })?;

        let value = parse_section(section, &raw)?;
        check_shape(section, &value)?;
        Ok(value)
    }
}

/// Parse raw YAML text for a section into a JSON value.
///
/// Merge keys (`<<`) are resolved. No shape check is applied here.
pub fn parse_section(section: Section, raw: &str) -> SectionResult {
    let mut yaml: serde_yaml::Value =
        serde_yaml::from_str(raw).map_err(|e| parse_error(section, &e))?;
    yaml.apply_merge().map_err(|e| parse_error(section, &e))?;
    Ok(yaml_to_json(yaml))
}

fn parse_error(section: Section, error: &serde_yaml::Error) -> SectionError {
    SectionError::Parse {
        section,
        line: error.location().map(|l| l.line()),
        message: error.to_string(),
    }
}

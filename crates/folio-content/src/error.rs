//! Content loading errors.

use crate::section::Section;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reading from the backing store.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("file too large: {size} bytes (max: {max}): {}", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("content root is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("content root unreachable: {}: {source}", path.display())]
    Unreachable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a single section could not be produced.
///
/// This is the per-section result kind: callers can tell a missing
/// document from a malformed one without reading logs.
#[derive(Debug, Error)]
pub enum SectionError {
    #[error("section {section} is unavailable: {source}")]
    Unavailable {
        section: Section,
        #[source]
        source: SourceError,
    },

    #[error(
        "section {section} failed to parse{}: {message}",
        line.map(|l| format!(" at line {l}")).unwrap_or_default()
    )]
    Parse {
        section: Section,
        line: Option<usize>,
        message: String,
    },

    #[error("section {section} must be a mapping at its root, found {found}")]
    SchemaMismatch {
        section: Section,
        found: &'static str,
    },
}

impl SectionError {
    /// Stable machine-readable kind, also used as the metrics error type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "source_unavailable",
            Self::Parse { .. } => "parse_failure",
            Self::SchemaMismatch { .. } => "schema_mismatch",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Self::Unavailable { section, .. }
            | Self::Parse { section, .. }
            | Self::SchemaMismatch { section, .. } => *section,
        }
    }
}

/// The bundle as a whole could not be assembled.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("content store unreachable: {0}")]
    StoreUnreachable(#[source] SourceError),
}

//! Folio content layer.
//!
//! Site copy lives in one YAML document per [`Section`]. The
//! [`ContentLoader`] reads and parses a single section, turning any failure
//! into a [`SectionError`] instead of propagating it, and the
//! [`ContentAggregator`] loads every section into a [`ContentBundle`] so one
//! broken file never takes its siblings down with it.
//!
//! Nothing is cached here: every call goes back to the [`ContentSource`], so
//! edits on disk are visible on the next request.

pub mod aggregator;
pub mod bundle;
pub mod convert;
pub mod error;
pub mod loader;
pub mod schema;
pub mod section;
pub mod source;

pub use aggregator::{ContentAggregator, LoadReport, SectionOutcome};
pub use bundle::ContentBundle;
pub use error::{AggregationError, SectionError, SourceError};
pub use loader::{parse_section, ContentLoader, SectionResult};
pub use section::{ParseSectionError, Section};
pub use source::{ContentSource, FsContentSource};

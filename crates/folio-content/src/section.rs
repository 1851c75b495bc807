//! The fixed catalogue of content sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One independently edited unit of site content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Hero,
    About,
    Contact,
    Navigation,
    Footer,
    Demos,
    ResumeChat,
    Metadata,
    Testimonials,
    PagePreviews,
    Achievements,
    Projects,
}

impl Section {
    /// Every section, in bundle order.
    pub const ALL: [Section; 12] = [
        Section::Hero,
        Section::About,
        Section::Contact,
        Section::Navigation,
        Section::Footer,
        Section::Demos,
        Section::ResumeChat,
        Section::Metadata,
        Section::Testimonials,
        Section::PagePreviews,
        Section::Achievements,
        Section::Projects,
    ];

    /// Key used in the JSON bundle.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Navigation => "navigation",
            Self::Footer => "footer",
            Self::Demos => "demos",
            Self::ResumeChat => "resumeChat",
            Self::Metadata => "metadata",
            Self::Testimonials => "testimonials",
            Self::PagePreviews => "pagePreviews",
            Self::Achievements => "achievements",
            Self::Projects => "projects",
        }
    }

    /// File stem of the backing document.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::ResumeChat => "resume-chat",
            Self::PagePreviews => "page-previews",
            other => other.key(),
        }
    }

    /// File name of the backing document.
    pub fn file_name(&self) -> String {
        format!("{}.yml", self.file_stem())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for a name that is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content section: {0}")]
pub struct ParseSectionError(pub String);

impl FromStr for Section {
    type Err = ParseSectionError;

    /// Accepts the bundle key (`resumeChat`), the file stem (`resume-chat`)
    /// or the file name (`resume-chat.yml`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_suffix(".yml").unwrap_or(s);
        Section::ALL
            .into_iter()
            .find(|section| section.key() == name || section.file_stem() == name)
            .ok_or_else(|| ParseSectionError(s.to_string()))
    }
}

//! Where section documents come from.

use crate::error::SourceError;
use crate::section::Section;
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Upper bound on a single section document.
pub const MAX_SECTION_BYTES: u64 = 1024 * 1024;

/// A store of raw section documents.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Check the store is reachable at all.
    async fn probe(&self) -> Result<(), SourceError>;

    /// Read the raw text for one section.
    async fn read(&self, section: Section) -> Result<String, SourceError>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}

/// Sections stored as `<stem>.yml` files in a directory.
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, section: Section) -> PathBuf {
        self.root.join(section.file_name())
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn probe(&self) -> Result<(), SourceError> {
        let metadata = tokio::fs::metadata(&self.root)
            .await
            .map_err(|source| SourceError::Unreachable {
                path: self.root.clone(),
                source,
            })?;

        if !metadata.is_dir() {
            return Err(SourceError::NotADirectory {
                path: self.root.clone(),
            });
        }
        Ok(())
    }

    async fn read(&self, section: Section) -> Result<String, SourceError> {
        let path = self.path_of(section);

        let metadata = tokio::fs::metadata(&path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound { path: path.clone() },
            _ => SourceError::Io {
                path: path.clone(),
                source: e,
            },
        })?;

        if metadata.len() > MAX_SECTION_BYTES {
            return Err(SourceError::TooLarge {
                path,
                size: metadata.len(),
                max: MAX_SECTION_BYTES,
            });
        }

        // The file may vanish between the two calls.
        tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SourceError::NotFound { path: path.clone() },
            _ => SourceError::Io {
                path: path.clone(),
                source: e,
            },
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_test_utils::ContentFixture;

    #[tokio::test]
    async fn test_read_existing_section() {
        let fixture = ContentFixture::empty();
        fixture.write("resume-chat.yml", "greeting: hi\n");

        let source = FsContentSource::new(fixture.path());
        let text = source.read(Section::ResumeChat).await.unwrap();
        assert_eq!(text, "greeting: hi\n");
    }

    #[tokio::test]
    async fn test_missing_section_is_not_found() {
        let fixture = ContentFixture::empty();
        let source = FsContentSource::new(fixture.path());

        let err = source.read(Section::Hero).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound { ref path } if path.ends_with("hero.yml")));
    }

    #[tokio::test]
    async fn test_oversized_section_is_rejected() {
        let fixture = ContentFixture::empty();
        let big = "a".repeat(MAX_SECTION_BYTES as usize + 1);
        fixture.write("about.yml", &big);

        let source = FsContentSource::new(fixture.path());
        let err = source.read(Section::About).await.unwrap_err();
        assert!(matches!(err, SourceError::TooLarge { .. }));
    }

    #[tokio::test]
    async fn test_probe() {
        let fixture = ContentFixture::empty();
        assert!(FsContentSource::new(fixture.path()).probe().await.is_ok());

        let missing = FsContentSource::new(fixture.file("nope"));
        assert!(matches!(
            missing.probe().await,
            Err(SourceError::Unreachable { .. })
        ));

        fixture.write("plain.txt", "x");
        let file = FsContentSource::new(fixture.file("plain.txt"));
        assert!(matches!(
            file.probe().await,
            Err(SourceError::NotADirectory { .. })
        ));
    }
}

//! Test utilities for Folio crates.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// File names of every content section, in catalogue order.
pub const SECTION_FILES: [&str; 12] = [
    "hero.yml",
    "about.yml",
    "contact.yml",
    "navigation.yml",
    "footer.yml",
    "demos.yml",
    "resume-chat.yml",
    "metadata.yml",
    "testimonials.yml",
    "page-previews.yml",
    "achievements.yml",
    "projects.yml",
];

/// A throwaway content directory holding YAML section files.
pub struct ContentFixture {
    dir: TempDir,
}

impl ContentFixture {
    /// An empty content directory.
    pub fn empty() -> Self {
        Self { dir: temp_dir() }
    }

    /// A content directory where every section is a small valid mapping
    /// of the form `title: <stem>`.
    pub fn complete() -> Self {
        let fixture = Self::empty();
        for file in SECTION_FILES {
            let stem = file.trim_end_matches(".yml");
            fixture.write(file, &format!("title: {stem}\n"));
        }
        fixture
    }

    /// Path of the content directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the content directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write (or overwrite) a file.
    pub fn write(&self, name: &str, contents: &str) -> &Self {
        std::fs::write(self.file(name), contents).expect("Failed to write fixture file");
        self
    }

    /// Delete a file.
    pub fn remove(&self, name: &str) -> &Self {
        std::fs::remove_file(self.file(name)).expect("Failed to remove fixture file");
        self
    }
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

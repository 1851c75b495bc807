//! Environment variable handling.

use crate::mode::ExecutionMode;
use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("failed to load {}: {source}", path.display())]
    DotenvError {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Environment variable names.
pub mod vars {
    // Execution
    pub const FOLIO_ENV: &str = "FOLIO_ENV";
    pub const FOLIO_PUBLIC_URL: &str = "FOLIO_PUBLIC_URL";

    // Server
    pub const FOLIO_CONFIG_PATH: &str = "FOLIO_CONFIG_PATH";
    pub const FOLIO_CONTENT_DIR: &str = "FOLIO_CONTENT_DIR";
    pub const FOLIO_PORT: &str = "FOLIO_PORT";

    // Logging
    pub const FOLIO_LOG_LEVEL: &str = "FOLIO_LOG_LEVEL";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Environment access helpers.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Load `.env` files in order (later files override earlier ones).
    ///
    /// Missing files are skipped; `.env.<mode>` is chosen from `FOLIO_ENV`.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn init() -> Result<Self, EnvError> {
        Self::load_file(".env")?;
        Self::load_file(".env.local")?;

        let mode = Self::mode()?;
        Self::load_file(format!(".env.{}", mode))?;

        Ok(Self { _guard: () })
    }

    /// Load one dotenv file. Returns `Ok(false)` when it does not exist.
    pub fn load_file(path: impl AsRef<Path>) -> Result<bool, EnvError> {
        let path = path.as_ref();
        match dotenvy::from_path(path) {
            Ok(()) => Ok(true),
            Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(EnvError::DotenvError {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Get an optional string variable. Empty values count as unset.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.trim().is_empty())
    }

    /// Get a boolean variable.
    pub fn get_bool(var: &str) -> Option<bool> {
        Self::get(var).map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
    }

    /// Execution mode from `FOLIO_ENV`; unset means development.
    pub fn mode() -> Result<ExecutionMode, EnvError> {
        match Self::get(vars::FOLIO_ENV) {
            Some(v) => v.parse().map_err(|e: crate::mode::ParseModeError| EnvError::InvalidValue {
                var: vars::FOLIO_ENV.to_string(),
                message: e.to_string(),
            }),
            None => Ok(ExecutionMode::Development),
        }
    }
}

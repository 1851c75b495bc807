//! Configuration loading utilities.

use super::types::ServerConfig;
use anyhow::{Context, Result};
use folio_common_config::{vars, Environment};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load configuration from various sources.
///
/// Sources, lowest precedence first: the embedded defaults, an optional
/// TOML/YAML/JSON file, `FOLIO__<SECTION>__<KEY>` variables, and finally the
/// shorthand variables `FOLIO_ENV`, `FOLIO_PUBLIC_URL`, `FOLIO_CONTENT_DIR`
/// and `FOLIO_PORT`.
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
    shorthand_env: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: "FOLIO".to_string(),
            shorthand_env: true,
        }
    }

    /// Set config file path.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Set environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Ignore the shorthand variables.
    pub fn without_shorthand_env(mut self) -> Self {
        self.shorthand_env = false;
        self
    }

    /// Load configuration.
    pub fn load(&self) -> Result<ServerConfig> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            include_str!("defaults.toml"),
            config::FileFormat::Toml,
        ));

        if let Some(path) = &self.config_path {
            if Path::new(path).exists() {
                info!(path = %path.display(), "Loading config file");
                builder = builder.add_source(config::File::from(path.as_path()));
            } else {
                warn!(path = %path.display(), "Config file not found, using defaults");
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        if self.shorthand_env {
            let mode = Environment::get(vars::FOLIO_ENV)
                .map(|_| Environment::mode().map(|m| m.as_str()))
                .transpose()
                .context("Invalid execution mode")?;

            builder = builder
                .set_override_option("app.mode", mode)?
                .set_override_option("app.public_url", Environment::get(vars::FOLIO_PUBLIC_URL))?
                .set_override_option("content.dir", Environment::get(vars::FOLIO_CONTENT_DIR))?
                .set_override_option("server.port", Environment::get(vars::FOLIO_PORT))?;
        }

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from environment.
pub fn load_config() -> Result<ServerConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = Environment::get(vars::FOLIO_CONFIG_PATH) {
        loader = loader.with_config_path(path);
    }
    loader.load()
}

//! Configuration validation.

use super::types::ServerConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    #[error("Invalid bind host: {0}")]
    InvalidHost(String),

    #[error("Invalid public URL {url}: {reason}")]
    InvalidPublicUrl { url: String, reason: String },

    #[error("Invalid LeetCode base URL {url}: {reason}")]
    InvalidLeetCodeUrl { url: String, reason: String },

    #[error("Invalid timeout for {0}: must be greater than zero")]
    InvalidTimeout(&'static str),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Content directory must not be empty")]
    EmptyContentDir,
}

/// Validate server configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push(ConfigError::InvalidPort(0));
    }

    if config.socket_addr().is_err() {
        errors.push(ConfigError::InvalidHost(config.server.host.clone()));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ConfigError::InvalidTimeout("server.request_timeout_secs"));
    }

    if let Err(e) = url::Url::parse(&config.app.public_url) {
        errors.push(ConfigError::InvalidPublicUrl {
            url: config.app.public_url.clone(),
            reason: e.to_string(),
        });
    }

    if let Err(e) = url::Url::parse(&config.leetcode.base_url) {
        errors.push(ConfigError::InvalidLeetCodeUrl {
            url: config.leetcode.base_url.clone(),
            reason: e.to_string(),
        });
    }

    if config.leetcode.timeout_ms == 0 {
        errors.push(ConfigError::InvalidTimeout("leetcode.timeout_ms"));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.to_lowercase().as_str()) {
        errors.push(ConfigError::InvalidLogLevel(config.logging.level.clone()));
    }

    if config.content.dir.as_os_str().is_empty() {
        errors.push(ConfigError::EmptyContentDir);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidPort(0))));
    }

    #[test]
    fn test_invalid_public_url() {
        let mut config = ServerConfig::default();
        config.app.public_url = "not a url".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidPublicUrl { .. })));
    }

    #[test]
    fn test_zero_timeouts() {
        let mut config = ServerConfig::default();
        config.leetcode.timeout_ms = 0;
        config.server.request_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ConfigError::InvalidTimeout(_)))
                .count(),
            2
        );
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ServerConfig::default();
        config.logging.level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidLogLevel(_))));
    }

    #[test]
    fn test_collects_every_problem() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        config.content.dir = PathBuf::new();
        config.leetcode.base_url = "::".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| matches!(e, ConfigError::EmptyContentDir)));
    }
}

//! Server configuration types.

use folio_common_config::ExecutionMode;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Main server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration.
    #[serde(default)]
    pub server: ServerBindConfig,
    /// Application identity and execution mode.
    #[serde(default)]
    pub app: AppConfig,
    /// Content store location.
    #[serde(default)]
    pub content: ContentConfig,
    /// LeetCode stats pass-through.
    #[serde(default)]
    pub leetcode: LeetCodeConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Response hardening.
    #[serde(default)]
    pub security: SecurityConfig,
}

impl ServerConfig {
    /// Address to bind, if `host` is an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    pub fn mode(&self) -> ExecutionMode {
        self.app.mode
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

/// Server binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerBindConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerBindConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Application identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Reported by health and metrics.
    #[serde(default = "default_version")]
    pub version: String,
    /// Controls cache headers.
    #[serde(default)]
    pub mode: ExecutionMode,
    /// Public base URL of the site, used as the CORS origin.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

fn default_app_name() -> String {
    "folio".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_public_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_version(),
            mode: ExecutionMode::default(),
            public_url: default_public_url(),
        }
    }
}

/// Content store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding the section `.yml` files.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

/// LeetCode stats configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeConfig {
    /// Stats API base URL; the username is appended as a path segment.
    #[serde(default = "default_leetcode_url")]
    pub base_url: String,
    /// Empty means always serve the fallback.
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_leetcode_timeout")]
    pub timeout_ms: u64,
}

fn default_leetcode_url() -> String {
    "https://leetcode-stats-api.herokuapp.com".to_string()
}

fn default_leetcode_timeout() -> u64 {
    5000
}

impl LeetCodeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LeetCodeConfig {
    fn default() -> Self {
        Self {
            base_url: default_leetcode_url(),
            username: String::new(),
            timeout_ms: default_leetcode_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty, compact or json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Security header configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Send the hardening headers on every response.
    #[serde(default = "default_true")]
    pub secure_headers: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secure_headers: true,
        }
    }
}

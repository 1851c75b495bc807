//! Execution mode of the running process.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The mode the site is running in.
///
/// Only [`ExecutionMode::Development`] changes observable behaviour: content
/// responses are marked uncacheable so YAML edits show up on the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Development,
    Production,
    Test,
}

impl ExecutionMode {
    /// Name as reported by the health and metrics endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown execution mode: {0}")]
pub struct ParseModeError(pub String);

impl FromStr for ExecutionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("development".parse(), Ok(ExecutionMode::Development));
        assert_eq!("DEV".parse(), Ok(ExecutionMode::Development));
        assert_eq!(" prod ".parse(), Ok(ExecutionMode::Production));
        assert_eq!("test".parse(), Ok(ExecutionMode::Test));
        assert!("staging".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn test_default_is_development() {
        assert!(ExecutionMode::default().is_development());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ExecutionMode::Production).unwrap();
        assert_eq!(json, "\"production\"");
        let mode: ExecutionMode = serde_json::from_str("\"test\"").unwrap();
        assert_eq!(mode, ExecutionMode::Test);
    }
}

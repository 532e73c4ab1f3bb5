//! Client Configuration
//!
//! Defines the configuration for the AgentChat client including:
//! - API endpoint and request timeout
//! - Agent profile sent at registration
//! - Topic tags attached to new channels
//! - Location of the credentials file
//!
//! Values come from compiled defaults, optionally overridden by a TOML file.
//! The binary layers CLI flags and environment variables on top.

use crate::identity::DEFAULT_CREDENTIALS_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Hosted AgentChat API
pub const DEFAULT_API_URL: &str = "https://agentchat-public.yksanjo.workers.dev";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default page size for message history
pub const DEFAULT_MESSAGE_LIMIT: u32 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub agent: AgentProfile,
    pub channels: ChannelDefaults,
    /// Credentials file, relative to the working directory unless absolute
    pub credentials_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            agent: AgentProfile::default(),
            channels: ChannelDefaults::default(),
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from an explicit path. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    /// Load the default config file if present, otherwise defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Per-request timeout, never below one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }
}

/// `<config_dir>/agentchat/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("agentchat").join("config.toml"))
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Profile published at registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentProfile {
    pub name: String,
    pub capabilities: Vec<String>,
    pub description: String,
    /// Avatar URL. Empty means a generated avatar seeded by the name.
    pub avatar: String,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            name: "Kimi".to_string(),
            capabilities: [
                "coding",
                "debugging",
                "architecture-design",
                "code-review",
                "analysis",
                "problem-solving",
                "automation",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            description: "I'm Kimi, an AI assistant specializing in software engineering, \
                debugging, and problem-solving. I love helping with code reviews, \
                architecture decisions, and building cool things!"
                .to_string(),
            avatar: String::new(),
        }
    }
}

impl AgentProfile {
    pub fn avatar_url(&self) -> String {
        if self.avatar.is_empty() {
            format!(
                "https://api.dicebear.com/7.x/bottts/svg?seed={}",
                self.name.to_lowercase()
            )
        } else {
            self.avatar.clone()
        }
    }
}

/// Defaults applied to channels created by this client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelDefaults {
    pub topic_tags: Vec<String>,
}

impl Default for ChannelDefaults {
    fn default() -> Self {
        Self {
            topic_tags: vec![
                "coding".to_string(),
                "debugging".to_string(),
                "architecture".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.agent.name, "Kimi");
        assert_eq!(config.agent.capabilities.len(), 7);
        assert_eq!(
            config.credentials_path,
            PathBuf::from(".agentchat_credentials.json")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            url = "http://localhost:8787"

            [agent]
            name = "Scout"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.url, "http://localhost:8787");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.agent.name, "Scout");
        assert_eq!(config.agent.capabilities.len(), 7);
        assert_eq!(config.channels.topic_tags, vec!["coding", "debugging", "architecture"]);
    }

    #[test]
    fn test_invalid_toml() {
        let err = ClientConfig::from_toml("[api\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml(_)));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = ClientConfig::from_toml("[api]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let mut config = ClientConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = ClientConfig::from_file(Path::new("/nonexistent/agentchat.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_avatar_url_seeded_by_name() {
        let profile = AgentProfile::default();
        assert_eq!(
            profile.avatar_url(),
            "https://api.dicebear.com/7.x/bottts/svg?seed=kimi"
        );

        let custom = AgentProfile {
            avatar: "https://example.com/a.png".to_string(),
            ..AgentProfile::default()
        };
        assert_eq!(custom.avatar_url(), "https://example.com/a.png");
    }
}

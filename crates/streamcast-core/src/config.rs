use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, StreamcastError};
use crate::stream::{default_streams, StreamDescriptor};

/// Top-level configuration for Streamcast.
///
/// Loaded from `~/.streamcast/config.toml` by default. Every section is
/// optional; missing sections fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamcastConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub skill: SkillConfig,
    #[serde(default = "default_streams")]
    pub streams: Vec<StreamDescriptor>,
}

impl Default for StreamcastConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            skill: SkillConfig::default(),
            streams: default_streams(),
        }
    }
}

impl StreamcastConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StreamcastConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Check the invariants the skill relies on at runtime.
    pub fn validate(&self) -> Result<()> {
        let Some(stream) = self.streams.first() else {
            return Err(StreamcastError::Config(
                "at least one [[streams]] entry is required".to_string(),
            ));
        };
        if stream.token.is_empty() {
            return Err(StreamcastError::Config(
                "stream token must not be empty".to_string(),
            ));
        }
        if !stream.url.starts_with("https://") {
            return Err(StreamcastError::Config(format!(
                "stream url must use https: {}",
                stream.url
            )));
        }
        if self.server.max_body_bytes == 0 {
            return Err(StreamcastError::Config(
                "server.max_body_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The stream every handler plays.
    pub fn primary_stream(&self) -> Option<&StreamDescriptor> {
        self.streams.first()
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Largest accepted request envelope.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
            max_body_bytes: 256 * 1024,
        }
    }
}

/// Skill behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Directory holding `<locale>.json` prompt files.
    pub prompts_dir: String,
    /// When set, requests from any other application id are rejected.
    pub skill_id: Option<String>,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            prompts_dir: "languages".to_string(),
            skill_id: None,
        }
    }
}

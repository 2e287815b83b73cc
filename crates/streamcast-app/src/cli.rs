//! CLI argument definitions for the Streamcast binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;
use streamcast_core::StreamcastConfig;

/// Streamcast - a voice skill that plays a live radio stream.
#[derive(Parser, Debug)]
#[command(name = "streamcast", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Skill endpoint port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Skill endpoint bind address.
    #[arg(long = "host")]
    pub host: Option<String>,

    /// Directory holding `<locale>.json` prompt files.
    #[arg(long = "prompts-dir")]
    pub prompts_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Answer a single request envelope read from this file (`-` for stdin)
    /// and exit instead of serving.
    #[arg(short = 'e', long = "event")]
    pub event: Option<PathBuf>,

    /// Write the effective configuration to the config path and exit.
    #[arg(long = "init-config")]
    pub init_config: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > STREAMCAST_CONFIG env var > ~/.streamcast/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("STREAMCAST_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the endpoint port.
    ///
    /// Priority: --port flag > STREAMCAST_PORT env var > config file value > 3030.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("STREAMCAST_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        if config_port != 0 {
            return config_port;
        }
        3030
    }

    /// Resolve the log level.
    ///
    /// Returns `None` if not overridden.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }

    /// Apply every command-line override onto `config`.
    pub fn apply_overrides(&self, config: &mut StreamcastConfig) {
        config.server.port = self.resolve_port(config.server.port);
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(ref dir) = self.prompts_dir {
            config.skill.prompts_dir = dir.to_string_lossy().to_string();
        }
        if let Some(level) = self.resolve_log_level() {
            config.general.log_level = level;
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".streamcast").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".streamcast").join("config.toml");
    }
    PathBuf::from("config.toml")
}

//! Streamcast binary - composition root.
//!
//! 1. Resolve and load configuration (CLI > env > TOML > defaults)
//! 2. Initialize tracing
//! 3. Build the skill from the configuration
//! 4. Either answer one request envelope (`--event`) or serve HTTP

mod cli;

use std::io::Read;
use std::path::Path;

use clap::Parser;
use streamcast_core::{RequestEnvelope, StreamcastConfig, StreamcastError};
use streamcast_skill::Skill;

use streamcast_api::routes;
use streamcast_api::state::AppState;

use cli::CliArgs;

/// Logs go to stderr so `--event` output stays machine-readable.
fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Answer a single envelope from `source` and print the response.
fn run_event(skill: &Skill, source: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = if source == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)?
    };

    let envelope: RequestEnvelope = serde_json::from_str(&raw)?;
    let response = skill.invoke(&envelope)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Load `path` if it exists. A file that exists but cannot be loaded
/// yields defaults together with the load error.
fn load_config(path: &Path) -> (StreamcastConfig, Option<StreamcastError>) {
    if !path.exists() {
        return (StreamcastConfig::default(), None);
    }
    match StreamcastConfig::load(path) {
        Ok(config) => (config, None),
        Err(e) => (StreamcastConfig::default(), Some(e)),
    }
}

/// Write `config` to `path` for `--init-config`.
///
/// Refuses when the existing file failed to load, so a typo never gets
/// replaced by defaults.
fn write_config(
    config: &StreamcastConfig,
    path: &Path,
    load_error: Option<StreamcastError>,
) -> Result<(), StreamcastError> {
    if let Some(e) = load_error {
        return Err(StreamcastError::Config(format!(
            "refusing to overwrite {}: {}",
            path.display(),
            e
        )));
    }
    config.save(path)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config. A broken file is reported once tracing is up.
    let config_file = args.resolve_config_path();
    let (mut config, load_error) = load_config(&config_file);
    args.apply_overrides(&mut config);

    // Tracing.
    init_tracing(&config.general.log_level);
    tracing::info!("Starting Streamcast v{}", env!("CARGO_PKG_VERSION"));

    if args.init_config {
        config.validate()?;
        write_config(&config, &config_file, load_error)?;
        return Ok(());
    }

    match load_error {
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Config unreadable, using defaults"
        ),
        None => tracing::debug!(path = %config_file.display(), "Configuration resolved"),
    }

    config.validate()?;

    let skill = Skill::from_config(&config)?;
    tracing::info!(
        stream = %skill.stream().title,
        handlers = skill.handler_names().len(),
        "Skill ready"
    );

    if let Some(ref source) = args.event {
        return run_event(&skill, source);
    }

    let state = AppState::new(skill, config);
    routes::start_server(state).await?;

    Ok(())
}

//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables (a local `.env`
//!    file is folded in when present)
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `MEDIATRACKER_BACKEND_URL`: Base URL of the hosted backend
//! - `MEDIATRACKER_ANON_KEY`: Publishable API key
//! - `MEDIATRACKER_HEARTBEAT_SECS`: Realtime heartbeat interval (optional)
//! - `MEDIATRACKER_KEYRING_SERVICE`: Keyring service name (optional)
//! - `MEDIATRACKER_KEYRING_ACCOUNT`: Keyring account name (optional)
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `mediatracker.{json,toml}`
//! in the working directory, its parents (up to 2 levels), and next to
//! the executable.

use std::path::{Path, PathBuf};

use mediatracker_domain::{
    BackendConfig, Config, MediaTrackerError, RealtimeConfig, Result, SessionConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `MediaTrackerError::Config` if configuration cannot be loaded
/// from either source.
pub fn load() -> Result<Config> {
    // Fold a local .env file into the process environment if one exists
    dotenvy::dotenv().ok();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The backend URL and key are required; everything else falls back to
/// its default.
///
/// # Errors
/// Returns `MediaTrackerError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let url = env_var("MEDIATRACKER_BACKEND_URL")?;
    let anon_key = env_var("MEDIATRACKER_ANON_KEY")?;

    let mut realtime = RealtimeConfig::default();
    if let Ok(raw) = std::env::var("MEDIATRACKER_HEARTBEAT_SECS") {
        realtime.heartbeat_secs = raw.parse::<u64>().map_err(|e| {
            MediaTrackerError::Config(format!("Invalid heartbeat interval: {}", e))
        })?;
    }

    let mut session = SessionConfig::default();
    if let Ok(service) = std::env::var("MEDIATRACKER_KEYRING_SERVICE") {
        session.keyring_service = service;
    }
    if let Ok(account) = std::env::var("MEDIATRACKER_KEYRING_ACCOUNT") {
        session.keyring_account = account;
    }

    Ok(Config { backend: BackendConfig { url, anon_key }, realtime, session })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `MediaTrackerError::Config` if no file is found, the format is
/// invalid, or required fields are missing.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MediaTrackerError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MediaTrackerError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MediaTrackerError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format detected by extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MediaTrackerError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MediaTrackerError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(MediaTrackerError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("mediatracker.json"),
            cwd.join("mediatracker.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("mediatracker.json"),
                exe_dir.join("mediatracker.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        MediaTrackerError::Config(format!("Missing required environment variable: {}", key))
    })
}

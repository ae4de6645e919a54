//! Application configuration structures
//!
//! Loaded by the infra config loader from environment variables or a
//! config file; see `mediatracker-infra::config`.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Hosted backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted backend, e.g. `https://abc.supabase.co`
    pub url: String,
    /// Publishable (anon) API key sent with every request
    pub anon_key: String,
}

/// Realtime channel settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Seconds between socket heartbeats
    pub heartbeat_secs: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self { heartbeat_secs: 30 }
    }
}

/// Local session persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Keyring service name the session is stored under
    pub keyring_service: String,
    /// Keyring account name
    pub keyring_account: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            keyring_service: "MediaTracker.session".to_string(),
            keyring_account: "main".to_string(),
        }
    }
}

//! Application context - dependency injection container

use std::sync::Arc;

use mediatracker_core::{ChatService, SessionService};
use mediatracker_domain::{Config, Result};
use mediatracker_infra::{
    GoTrueClient, HttpClient, KeyringSessionStore, PostgrestMessages, PostgrestProfiles,
    RealtimeClient, SessionStore, StorageClient, SupabaseEndpoints,
};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub sessions: Arc<SessionService>,
    pub chat: Arc<ChatService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire up every adapter against the configured backend.
    ///
    /// Construction is purely local; no network traffic happens until the
    /// first command runs.
    pub fn init(config: Config) -> Result<Arc<Self>> {
        let endpoints = SupabaseEndpoints::new(&config.backend)?;
        let http = HttpClient::builder()
            .default_headers(endpoints.default_headers()?)
            .build()?;

        let store: Arc<dyn SessionStore> =
            Arc::new(KeyringSessionStore::new(&config.session));

        let identity = Arc::new(GoTrueClient::new(http.clone(), endpoints.clone(), store));
        let profiles = Arc::new(PostgrestProfiles::new(http.clone(), endpoints.clone()));
        let avatars = Arc::new(StorageClient::new(http.clone(), endpoints.clone()));
        let messages = Arc::new(PostgrestMessages::new(http, endpoints.clone()));
        let realtime = Arc::new(RealtimeClient::new(endpoints, &config.realtime));

        let sessions = Arc::new(SessionService::new(identity, profiles, avatars));
        let chat = Arc::new(ChatService::new(messages, realtime));

        tracing::info!(backend = %config.backend.url, "application context initialized");

        Ok(Arc::new(Self { config, sessions, chat }))
    }
}

//! Shared helpers for infra integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use mediatracker_domain::{BackendConfig, Session};
use mediatracker_infra::{HttpClient, MemorySessionStore, SupabaseEndpoints};

pub const ANON_KEY: &str = "test-anon-key";

/// Endpoints pointed at a WireMock server.
pub fn endpoints_for(server_uri: &str) -> SupabaseEndpoints {
    SupabaseEndpoints::new(&BackendConfig {
        url: server_uri.to_string(),
        anon_key: ANON_KEY.to_string(),
    })
    .expect("test endpoints should build")
}

/// HTTP client carrying the backend default headers, no retries so tests
/// observe single requests.
pub fn http_for(endpoints: &SupabaseEndpoints) -> HttpClient {
    HttpClient::builder()
        .max_attempts(1)
        .default_headers(endpoints.default_headers().expect("default headers"))
        .build()
        .expect("test http client should build")
}

/// A session expiring `offset_secs` from now (negative means expired).
pub fn session_expiring_in(offset_secs: i64) -> Session {
    Session {
        access_token: "access-token".to_string(),
        refresh_token: "refresh-token".to_string(),
        user_id: "user-1".to_string(),
        email: "ada@example.com".to_string(),
        expires_at: Utc::now().timestamp() + offset_secs,
    }
}

pub fn store_with(session: Session) -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_session(session))
}

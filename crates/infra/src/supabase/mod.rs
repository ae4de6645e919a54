//! Hosted backend adapters
//!
//! The backend is a Supabase-style service: GoTrue email/password auth,
//! a PostgREST row store, object storage with public URLs, and a Phoenix
//! realtime socket over database row changes. Each adapter implements the
//! corresponding core port.

pub mod auth;
pub mod realtime;
pub mod rest;
pub mod storage;

use mediatracker_domain::{BackendConfig, MediaTrackerError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use url::Url;

use crate::errors::InfraError;

/// URL and header construction shared by all backend adapters.
#[derive(Debug, Clone)]
pub struct SupabaseEndpoints {
    base: Url,
    anon_key: String,
}

impl SupabaseEndpoints {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base = Url::parse(&config.url).map_err(InfraError::from)?;
        if config.anon_key.is_empty() {
            return Err(MediaTrackerError::Config("backend anon key is empty".into()));
        }
        Ok(Self { base, anon_key: config.anon_key.clone() })
    }

    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Headers every request carries: the publishable key, plus a bearer
    /// token (the anon key until a user token is supplied per-request).
    pub fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.anon_key)
            .map_err(|_| MediaTrackerError::Config("anon key is not a valid header".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.anon_key))
            .map_err(|_| MediaTrackerError::Config("anon key is not a valid header".into()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    pub fn auth(&self, path: &str) -> Result<Url> {
        self.join(&format!("auth/v1/{path}"))
    }

    pub fn rest(&self, table: &str) -> Result<Url> {
        self.join(&format!("rest/v1/{table}"))
    }

    pub fn storage_object(&self, bucket: &str, name: &str) -> Result<Url> {
        self.join(&format!("storage/v1/object/{bucket}/{name}"))
    }

    pub fn storage_public_url(&self, bucket: &str, name: &str) -> Result<String> {
        Ok(self.join(&format!("storage/v1/object/public/{bucket}/{name}"))?.to_string())
    }

    /// Realtime socket URL (`ws`/`wss` scheme) with the api key attached.
    pub fn realtime_socket(&self) -> Result<Url> {
        let mut url = self.join("realtime/v1/websocket")?;
        let scheme = match url.scheme() {
            "https" => "wss",
            "http" => "ws",
            other => {
                return Err(MediaTrackerError::Config(format!(
                    "unsupported backend scheme: {other}"
                )))
            }
        };
        url.set_scheme(scheme)
            .map_err(|()| MediaTrackerError::Config("backend URL cannot be a socket".into()))?;
        url.query_pairs_mut()
            .append_pair("apikey", &self.anon_key)
            .append_pair("vsn", "1.0.0");
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|err| InfraError::from(err).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> SupabaseEndpoints {
        SupabaseEndpoints::new(&BackendConfig {
            url: "https://abc.supabase.co".into(),
            anon_key: "anon-key".into(),
        })
        .unwrap()
    }

    #[test]
    fn builds_service_urls() {
        let e = endpoints();
        assert_eq!(
            e.auth("token").unwrap().as_str(),
            "https://abc.supabase.co/auth/v1/token"
        );
        assert_eq!(
            e.rest("chat_history").unwrap().as_str(),
            "https://abc.supabase.co/rest/v1/chat_history"
        );
        assert_eq!(
            e.storage_public_url("avatars", "u1.jpg").unwrap(),
            "https://abc.supabase.co/storage/v1/object/public/avatars/u1.jpg"
        );
    }

    #[test]
    fn realtime_socket_flips_scheme_and_carries_key() {
        let url = endpoints().realtime_socket().unwrap();
        assert_eq!(url.scheme(), "wss");
        assert!(url.query().unwrap_or_default().contains("apikey=anon-key"));
    }

    #[test]
    fn empty_anon_key_is_a_config_error() {
        let result = SupabaseEndpoints::new(&BackendConfig {
            url: "https://abc.supabase.co".into(),
            anon_key: String::new(),
        });
        assert!(matches!(result, Err(MediaTrackerError::Config(_))));
    }
}

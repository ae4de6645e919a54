//! PostgREST row store adapters
//!
//! Profiles are keyed by identity user id; chat rows are read through an
//! embedded author join so callers always receive denormalized sender
//! fields. The wire shapes here follow PostgREST conventions: filters as
//! `column=eq.value` query pairs, `Prefer` headers for conflict handling,
//! representation returns, and exact counts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mediatracker_core::{MessageRepository, ProfileRepository};
use mediatracker_domain::{
    constants::{CHAT_TABLE, PROFILES_TABLE},
    types::chat::UNKNOWN_SENDER,
    ChatMessage, MediaTrackerError, ProfileUpdate, Result, UserProfile, UserRole,
};
use reqwest::header::HeaderValue;
use reqwest::{Method, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::SupabaseEndpoints;
use crate::http::HttpClient;

/// Embedded-join projection used by every chat read.
const MESSAGE_SELECT: &str = "id,user_id,zone,message,timestamp,profiles:user_id(full_name,role)";

/// Chat row as PostgREST returns it, author join included.
#[derive(Debug, Deserialize)]
struct ChatRow {
    id: String,
    user_id: String,
    zone: String,
    message: String,
    timestamp: DateTime<Utc>,
    profiles: Option<AuthorJoin>,
}

#[derive(Debug, Deserialize)]
struct AuthorJoin {
    full_name: Option<String>,
    role: Option<String>,
}

impl ChatRow {
    /// Denormalize the author join, substituting the unknown-sender
    /// defaults when the profile row is missing or unreadable.
    fn into_message(self) -> ChatMessage {
        let (sender_name, sender_role) = match self.profiles {
            Some(join) => (
                join.full_name.unwrap_or_else(|| UNKNOWN_SENDER.to_string()),
                join.role.as_deref().and_then(parse_role).unwrap_or(UserRole::Staff),
            ),
            None => (UNKNOWN_SENDER.to_string(), UserRole::Staff),
        };
        ChatMessage {
            id: self.id,
            user_id: self.user_id,
            zone: self.zone,
            message: self.message,
            timestamp: self.timestamp,
            sender_name,
            sender_role,
        }
    }
}

fn parse_role(code: &str) -> Option<UserRole> {
    match code {
        "public" => Some(UserRole::Public),
        "staff" => Some(UserRole::Staff),
        "admin" => Some(UserRole::Admin),
        "super_admin" => Some(UserRole::SuperAdmin),
        _ => None,
    }
}

async fn failure_text(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    format!("{status}: {body}")
}

/// Profile store adapter.
pub struct PostgrestProfiles {
    http: HttpClient,
    endpoints: SupabaseEndpoints,
}

impl PostgrestProfiles {
    pub fn new(http: HttpClient, endpoints: SupabaseEndpoints) -> Self {
        Self { http, endpoints }
    }
}

#[async_trait]
impl ProfileRepository for PostgrestProfiles {
    async fn get_by_id(&self, id: &str) -> Result<Option<UserProfile>> {
        let mut url = self.endpoints.rest(PROFILES_TABLE)?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("select", "*");

        let response = self.http.send(self.http.request(Method::GET, url)).await?;
        if !response.status().is_success() {
            return Err(MediaTrackerError::Profile(failure_text(response).await));
        }

        let mut rows: Vec<UserProfile> = response
            .json()
            .await
            .map_err(|err| MediaTrackerError::Profile(format!("malformed profile row: {err}")))?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    async fn create(&self, profile: &UserProfile) -> Result<()> {
        let url = self.endpoints.rest(PROFILES_TABLE)?;
        let request = self
            .http
            .request(Method::POST, url)
            // insert-or-ignore: a concurrent first login racing us to the
            // insert must not fail the bootstrap
            .header("Prefer", HeaderValue::from_static("resolution=ignore-duplicates"))
            .json(profile);

        let response = self.http.send(request).await?;
        if !response.status().is_success() {
            return Err(MediaTrackerError::Profile(failure_text(response).await));
        }
        debug!(user_id = %profile.id, "profile row created");
        Ok(())
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> Result<UserProfile> {
        let mut url = self.endpoints.rest(PROFILES_TABLE)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let request = self
            .http
            .request(Method::PATCH, url)
            .header("Prefer", HeaderValue::from_static("return=representation"))
            .json(update);

        let response = self.http.send(request).await?;
        if !response.status().is_success() {
            return Err(MediaTrackerError::Profile(failure_text(response).await));
        }

        let mut rows: Vec<UserProfile> = response
            .json()
            .await
            .map_err(|err| MediaTrackerError::Profile(format!("malformed profile row: {err}")))?;
        if rows.is_empty() {
            return Err(MediaTrackerError::Profile(format!("no profile row for {id}")));
        }
        Ok(rows.swap_remove(0))
    }
}

/// Chat history adapter.
pub struct PostgrestMessages {
    http: HttpClient,
    endpoints: SupabaseEndpoints,
}

impl PostgrestMessages {
    pub fn new(http: HttpClient, endpoints: SupabaseEndpoints) -> Self {
        Self { http, endpoints }
    }

    async fn fetch_rows(&self, url: url::Url, context: &str) -> Result<Vec<ChatRow>> {
        let response = self.http.send(self.http.request(Method::GET, url)).await?;
        if !response.status().is_success() {
            return Err(MediaTrackerError::Fetch(failure_text(response).await));
        }
        response
            .json()
            .await
            .map_err(|err| MediaTrackerError::Fetch(format!("malformed {context} rows: {err}")))
    }
}

#[async_trait]
impl MessageRepository for PostgrestMessages {
    async fn messages_for_zone(&self, zone: &str) -> Result<Vec<ChatMessage>> {
        let mut url = self.endpoints.rest(CHAT_TABLE)?;
        url.query_pairs_mut()
            .append_pair("zone", &format!("eq.{zone}"))
            .append_pair("select", MESSAGE_SELECT)
            .append_pair("order", "timestamp.asc");

        let rows = self.fetch_rows(url, "chat history").await?;
        Ok(rows.into_iter().map(ChatRow::into_message).collect())
    }

    async fn insert_message(
        &self,
        zone: &str,
        text: &str,
        user_id: &str,
    ) -> Result<ChatMessage> {
        let mut url = self.endpoints.rest(CHAT_TABLE)?;
        // id and timestamp are server-assigned; the representation comes
        // back with the author join applied
        url.query_pairs_mut().append_pair("select", MESSAGE_SELECT);

        let request = self
            .http
            .request(Method::POST, url)
            .header("Prefer", HeaderValue::from_static("return=representation"))
            .json(&json!({ "user_id": user_id, "zone": zone, "message": text }));

        let response = self.http.send(request).await?;
        if !response.status().is_success() {
            return Err(MediaTrackerError::Send(failure_text(response).await));
        }

        let mut rows: Vec<ChatRow> = response
            .json()
            .await
            .map_err(|err| MediaTrackerError::Send(format!("malformed insert response: {err}")))?;
        if rows.is_empty() {
            return Err(MediaTrackerError::Send("no data returned from insert".into()));
        }
        Ok(rows.swap_remove(0).into_message())
    }

    async fn message_by_id(&self, id: &str) -> Result<Option<ChatMessage>> {
        let mut url = self.endpoints.rest(CHAT_TABLE)?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("select", MESSAGE_SELECT);

        let mut rows = self.fetch_rows(url, "chat message").await?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0).into_message()) })
    }

    async fn message_count(&self, zone: &str) -> Result<u64> {
        let mut url = self.endpoints.rest(CHAT_TABLE)?;
        url.query_pairs_mut()
            .append_pair("zone", &format!("eq.{zone}"))
            .append_pair("select", "id");

        let request = self
            .http
            .request(Method::HEAD, url)
            .header("Prefer", HeaderValue::from_static("count=exact"));

        let response = self.http.send(request).await?;
        if !response.status().is_success() {
            return Err(MediaTrackerError::Fetch(failure_text(response).await));
        }

        let total = response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| {
                MediaTrackerError::Fetch("count response missing content-range".into())
            })?;
        Ok(total)
    }
}

/// Extract the total from a `Content-Range` header, e.g. `0-24/3573` or
/// `*/0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.parse().ok()
}

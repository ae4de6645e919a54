//! User, session and profile types
//!
//! The profile row lives in the hosted backend; the session is issued by
//! the identity provider and persisted locally between launches.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ZONE;

/// Application role attached to a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Public,
    Staff,
    Admin,
    SuperAdmin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Public
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Staff => "staff",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ha,
    Yo,
    Ig,
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ha => "ha",
            Self::Yo => "yo",
            Self::Ig => "ig",
        }
    }

    /// Parse a stored language code, falling back to English for anything
    /// unknown rather than failing.
    pub fn from_code(code: &str) -> Self {
        match code {
            "ha" => Self::Ha,
            "yo" => Self::Yo,
            "ig" => Self::Ig,
            _ => Self::En,
        }
    }
}

/// Application profile, one-to-one with an authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity-provider user id; primary key of the profiles table
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    /// Home zone; also the default chat zone
    pub state: String,
    #[serde(default)]
    pub language_preference: Language,
    #[serde(default = "default_notifications")]
    pub notifications_enabled: bool,
    pub avatar_url: Option<String>,
}

fn default_notifications() -> bool {
    true
}

impl UserProfile {
    /// Profile synthesized when an authenticated user has no profile row.
    ///
    /// Role is `public` and the zone is the configured default; the caller
    /// decides whether it gets persisted or stays in-memory only.
    pub fn default_for(id: &str, email: &str) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            full_name: None,
            role: UserRole::Public,
            state: DEFAULT_ZONE.to_string(),
            language_preference: Language::En,
            notifications_enabled: true,
            avatar_url: None,
        }
    }

    /// Apply a partial update, returning the merged profile.
    pub fn merged_with(&self, update: &ProfileUpdate) -> Self {
        let mut merged = self.clone();
        if let Some(full_name) = &update.full_name {
            merged.full_name = Some(full_name.clone());
        }
        if let Some(state) = &update.state {
            merged.state = state.clone();
        }
        if let Some(language) = update.language_preference {
            merged.language_preference = language;
        }
        if let Some(enabled) = update.notifications_enabled {
            merged.notifications_enabled = enabled;
        }
        if let Some(avatar_url) = &update.avatar_url {
            merged.avatar_url = Some(avatar_url.clone());
        }
        merged
    }
}

/// Partial profile update, serialized as a PATCH body (absent fields are
/// left untouched server-side)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_preference: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.state.is_none()
            && self.language_preference.is_none()
            && self.notifications_enabled.is_none()
            && self.avatar_url.is_none()
    }
}

/// Authenticated session issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
    /// Unix timestamp (seconds) after which the access token is invalid
    pub expires_at: i64,
}

impl Session {
    /// Whether the access token expires within `leeway_secs` from now.
    pub fn expires_within(&self, leeway_secs: i64) -> bool {
        self.expires_at <= Utc::now().timestamp() + leeway_secs
    }
}

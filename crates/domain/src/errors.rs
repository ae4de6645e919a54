//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified authentication failures.
///
/// Produced at the identity-provider boundary by mapping provider error
/// codes (never by substring matching in business logic). Each category
/// carries a fixed user-facing message so raw backend strings are never
/// shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum AuthErrorKind {
    InvalidCredentials,
    UnconfirmedEmail,
    DuplicateAccount,
    WeakPassword,
    MalformedEmail,
    RateLimited,
    SessionExpired,
    /// Unclassified provider failure; detail is for logs, not users.
    Other(String),
}

impl AuthErrorKind {
    /// Fixed user-facing message for this failure category.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => {
                "Invalid email or password. Please check your credentials."
            }
            Self::UnconfirmedEmail => {
                "Please check your email and confirm your account before signing in."
            }
            Self::DuplicateAccount => {
                "An account with this email already exists. Try signing in instead."
            }
            Self::WeakPassword => "Password must be at least 6 characters long.",
            Self::MalformedEmail => "Please enter a valid email address.",
            Self::RateLimited => "Too many attempts. Please wait before trying again.",
            Self::SessionExpired => "Your session has expired. Please sign in again.",
            Self::Other(_) => "Something went wrong. Please try again.",
        }
    }
}

impl std::fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other(detail) => write!(f, "other ({detail})"),
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::UnconfirmedEmail => write!(f, "unconfirmed email"),
            Self::DuplicateAccount => write!(f, "duplicate account"),
            Self::WeakPassword => write!(f, "weak password"),
            Self::MalformedEmail => write!(f, "malformed email"),
            Self::RateLimited => write!(f, "rate limited"),
            Self::SessionExpired => write!(f, "session expired"),
        }
    }
}

/// Main error type for MediaTracker
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MediaTrackerError {
    #[error("Authentication error: {0}")]
    Auth(AuthErrorKind),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Send error: {0}")]
    Send(String),

    #[error("No user is currently signed in")]
    NotLoggedIn,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MediaTrackerError {
    /// Message suitable for direct display in the UI.
    ///
    /// Auth failures use the fixed per-category copy; everything else
    /// falls back to the error's own text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(kind) => kind.user_message().to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for MediaTracker operations
pub type Result<T> = std::result::Result<T, MediaTrackerError>;

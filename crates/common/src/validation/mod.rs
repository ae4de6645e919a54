//! Content validation rules
//!
//! Pure predicates with no I/O. The chat service runs [`validate_message`]
//! before any network call; the auth flows use [`is_valid_email`] to reject
//! malformed addresses client-side.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted chat message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Why a chat message was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MessageRejection {
    #[error("Message cannot be empty")]
    Empty,
    #[error("Message too long (max 1000 characters)")]
    TooLong,
    #[error("Message contains invalid content")]
    DisallowedContent,
}

/// Markup/script injection patterns that are never allowed in a message.
///
/// Matched case-insensitively against the raw (untrimmed) text.
static DENYLIST: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)<script",
        r"(?i)javascript:",
        r"(?i)\bon\w+\s*=",
        r"(?i)<iframe",
        r"(?i)<object",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

static EMAIL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Validate a chat message body.
///
/// Rejects empty/whitespace-only text, text over [`MAX_MESSAGE_CHARS`]
/// characters, and anything matching the markup denylist. Pure; never
/// touches the network.
pub fn validate_message(text: &str) -> Result<(), MessageRejection> {
    if text.trim().is_empty() {
        return Err(MessageRejection::Empty);
    }

    if text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(MessageRejection::TooLong);
    }

    if DENYLIST.iter().any(|pattern| pattern.is_match(text)) {
        return Err(MessageRejection::DisallowedContent);
    }

    Ok(())
}

/// Lightweight email shape check. Deliverability is the provider's problem;
/// this only catches obviously malformed input before a round trip.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email.trim()))
}

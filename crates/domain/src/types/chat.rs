//! Zone chat message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::user::UserRole;

/// Sender name substituted when the author profile join misses
/// (deleted or never-created profile).
pub const UNKNOWN_SENDER: &str = "Unknown User";

/// A chat message joined with its author's profile.
///
/// `sender_name` and `sender_role` are denormalized at read time from the
/// profiles table; they are not stored on the message row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Server-assigned message id
    pub id: String,
    pub user_id: String,
    pub zone: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub sender_name: String,
    pub sender_role: UserRole,
}

/// Raw message row as delivered by a realtime INSERT event.
///
/// Carries no author join; the synchronizer re-fetches the joined row
/// before handing anything to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertedRecord {
    pub id: String,
    pub user_id: String,
    pub zone: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

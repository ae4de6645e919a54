//! Port interfaces for zone chat
//!
//! The message repository hides the author-profile join; the realtime port
//! hides the push channel protocol.

use async_trait::async_trait;
use mediatracker_domain::{ChatMessage, InsertedRecord, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Trait for the hosted chat message store.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// All messages for a zone, joined with author profiles, ordered by
    /// timestamp ascending.
    async fn messages_for_zone(&self, zone: &str) -> Result<Vec<ChatMessage>>;

    /// Insert a message row (server assigns id and keeps the timestamp)
    /// and return it joined with the author profile.
    async fn insert_message(&self, zone: &str, text: &str, user_id: &str)
        -> Result<ChatMessage>;

    /// A single message by id, joined with its author profile.
    async fn message_by_id(&self, id: &str) -> Result<Option<ChatMessage>>;

    /// Row count for a zone.
    async fn message_count(&self, zone: &str) -> Result<u64>;
}

/// Live feed of raw insert events for one zone.
///
/// Cancelling the token releases the underlying channel; the event stream
/// then ends. Produced by [`RealtimeEvents::subscribe_inserts`].
pub struct InsertFeed {
    pub events: mpsc::Receiver<InsertedRecord>,
    pub cancel: CancellationToken,
}

/// Trait for the push channel over database row changes.
#[async_trait]
pub trait RealtimeEvents: Send + Sync {
    /// Open one channel filtered to INSERT events on the chat table where
    /// `zone` matches, delivering the raw inserted rows.
    async fn subscribe_inserts(&self, zone: &str) -> Result<InsertFeed>;
}

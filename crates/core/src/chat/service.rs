//! Zone chat synchronizer - core business logic

use std::sync::Arc;

use mediatracker_common::validation::{validate_message, MessageRejection};
use mediatracker_domain::{ChatMessage, MediaTrackerError, Result};
use tracing::{debug, warn};

use super::ports::{MessageRepository, RealtimeEvents};
use super::subscription::ZoneSubscription;

/// Read (history), write (send), and push (subscribe) access to per-zone
/// chat messages, hiding the join between message rows and author profiles.
pub struct ChatService {
    messages: Arc<dyn MessageRepository>,
    realtime: Arc<dyn RealtimeEvents>,
}

impl ChatService {
    pub fn new(messages: Arc<dyn MessageRepository>, realtime: Arc<dyn RealtimeEvents>) -> Self {
        Self { messages, realtime }
    }

    /// Full message history for a zone, timestamp ascending.
    ///
    /// Backend failures propagate so the caller can show a retry affordance.
    pub async fn messages_for_zone(&self, zone: &str) -> Result<Vec<ChatMessage>> {
        self.messages.messages_for_zone(zone).await
    }

    /// Validate and send one message, returning the stored row joined with
    /// the sender profile.
    ///
    /// Validation runs before any network call. Not optimistic: a client
    /// that also subscribes to the zone will see its own message again via
    /// the push path and must deduplicate by id.
    pub async fn send_message(
        &self,
        zone: &str,
        text: &str,
        user_id: &str,
    ) -> Result<ChatMessage> {
        validate_message(text)
            .map_err(|rejection| MediaTrackerError::Validation(rejection.to_string()))?;

        self.messages.insert_message(zone, text, user_id).await
    }

    /// Pure message validation, exposed for form-level feedback.
    pub fn validate_message(text: &str) -> std::result::Result<(), MessageRejection> {
        validate_message(text)
    }

    /// Open a push subscription for a zone.
    ///
    /// The realtime payload carries only the raw inserted row, so each
    /// event re-fetches the joined row before invoking `on_message`. A
    /// failed re-fetch drops that event (logged) rather than killing the
    /// subscription.
    pub async fn subscribe_to_zone_messages(
        &self,
        zone: &str,
        on_message: impl Fn(ChatMessage) + Send + Sync + 'static,
    ) -> Result<ZoneSubscription> {
        let feed = self.realtime.subscribe_inserts(zone).await?;
        let repository = Arc::clone(&self.messages);
        let zone_owned = zone.to_string();
        let cancel = feed.cancel.clone();

        let forwarder = tokio::spawn(async move {
            let mut events = feed.events;
            while let Some(record) = events.recv().await {
                match repository.message_by_id(&record.id).await {
                    Ok(Some(message)) => on_message(message),
                    Ok(None) => {
                        debug!(id = %record.id, "inserted row vanished before re-fetch")
                    }
                    Err(err) => {
                        warn!(id = %record.id, error = %err, "dropping realtime event");
                    }
                }
            }
        });

        Ok(ZoneSubscription::new(zone_owned, cancel, forwarder))
    }

    /// Display-only row count for a zone; degrades to 0 on any failure.
    pub async fn message_count(&self, zone: &str) -> u64 {
        match self.messages.message_count(zone).await {
            Ok(count) => count,
            Err(err) => {
                warn!(zone = %zone, error = %err, "message count unavailable");
                0
            }
        }
    }
}

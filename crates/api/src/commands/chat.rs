//! Zone chat commands

use std::sync::Arc;
use std::time::Instant;

use mediatracker_core::ZoneSubscription;
use mediatracker_domain::{ChatMessage, MediaTrackerError, Result};

use super::finish;
use crate::context::AppContext;

/// Joined message history for a zone, oldest first.
pub async fn get_messages_for_zone(
    ctx: &Arc<AppContext>,
    zone: &str,
) -> Result<Vec<ChatMessage>> {
    let start = Instant::now();
    let result = ctx.chat.messages_for_zone(zone).await;
    finish("chat::get_messages_for_zone", start, &result);
    result
}

/// Send a message to a zone as the signed-in user.
pub async fn send_message(
    ctx: &Arc<AppContext>,
    zone: &str,
    text: &str,
) -> Result<ChatMessage> {
    let start = Instant::now();
    let result = match ctx.sessions.current_user() {
        Some(user) => ctx.chat.send_message(zone, text, &user.id).await,
        None => Err(MediaTrackerError::NotLoggedIn),
    };
    finish("chat::send_message", start, &result);
    result
}

/// Open a realtime subscription for a zone.
///
/// The caller owns the returned handle; dropping or disposing it releases
/// the channel and stops callbacks.
pub async fn subscribe_to_zone_messages(
    ctx: &Arc<AppContext>,
    zone: &str,
    on_message: impl Fn(ChatMessage) + Send + Sync + 'static,
) -> Result<ZoneSubscription> {
    let start = Instant::now();
    let result = ctx.chat.subscribe_to_zone_messages(zone, on_message).await;
    finish("chat::subscribe_to_zone_messages", start, &result);
    result
}

/// Message count for a zone badge; 0 when the backend is unavailable.
pub async fn get_message_count(ctx: &Arc<AppContext>, zone: &str) -> u64 {
    ctx.chat.message_count(zone).await
}

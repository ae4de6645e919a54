//! Realtime push channel adapter
//!
//! Speaks the Phoenix-channel framing used by the hosted realtime service:
//! JSON frames of `{topic, event, payload, ref}` over a WebSocket. One
//! subscription joins the topic scoped to a zone's INSERT events, answers
//! the periodic heartbeat, and forwards raw inserted rows until the feed's
//! cancellation token fires, at which point it leaves the topic and closes
//! the socket.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use mediatracker_core::{InsertFeed, RealtimeEvents};
use mediatracker_domain::{constants::CHAT_TABLE, InsertedRecord, RealtimeConfig, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::SupabaseEndpoints;
use crate::errors::InfraError;

/// Capacity of the per-subscription event buffer. Events beyond it are
/// dropped, matching the best-effort contract of the push path.
const FEED_BUFFER: usize = 64;

/// Realtime client opening one channel per subscription.
pub struct RealtimeClient {
    endpoints: SupabaseEndpoints,
    heartbeat: Duration,
}

impl RealtimeClient {
    pub fn new(endpoints: SupabaseEndpoints, config: &RealtimeConfig) -> Self {
        Self { endpoints, heartbeat: Duration::from_secs(config.heartbeat_secs.max(1)) }
    }
}

/// One Phoenix socket frame.
#[derive(Debug, Serialize, Deserialize)]
struct SocketFrame {
    topic: String,
    event: String,
    payload: serde_json::Value,
    #[serde(rename = "ref")]
    reference: Option<String>,
}

impl SocketFrame {
    fn join(topic: &str, reference: u64) -> Self {
        Self {
            topic: topic.to_string(),
            event: "phx_join".to_string(),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }

    fn leave(topic: &str, reference: u64) -> Self {
        Self {
            topic: topic.to_string(),
            event: "phx_leave".to_string(),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }

    fn heartbeat(reference: u64) -> Self {
        Self {
            topic: "phoenix".to_string(),
            event: "heartbeat".to_string(),
            payload: json!({}),
            reference: Some(reference.to_string()),
        }
    }

    fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| InfraError::from(err).into())
    }

    /// The inserted row carried by an INSERT event, if this frame is one.
    fn insert_record(&self) -> Option<InsertedRecord> {
        if self.event != "INSERT" {
            return None;
        }
        let record = self.payload.get("record")?;
        match serde_json::from_value(record.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(error = %err, "undecodable INSERT payload, dropping event");
                None
            }
        }
    }
}

/// Channel topic for one zone's inserts, filtered server-side.
fn zone_topic(zone: &str) -> String {
    format!("realtime:public:{CHAT_TABLE}:zone=eq.{zone}")
}

#[async_trait]
impl RealtimeEvents for RealtimeClient {
    async fn subscribe_inserts(&self, zone: &str) -> Result<InsertFeed> {
        let url = self.endpoints.realtime_socket()?;
        let (socket, _response) =
            connect_async(url.as_str()).await.map_err(InfraError::from)?;
        debug!(zone = %zone, "realtime socket connected");

        let (mut sink, mut stream) = socket.split();
        let topic = zone_topic(zone);

        let mut reference: u64 = 1;
        sink.send(Message::Text(SocketFrame::join(&topic, reference).encode()?))
            .await
            .map_err(InfraError::from)?;

        let (tx, rx) = mpsc::channel(FEED_BUFFER);
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();
        let heartbeat = self.heartbeat;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(heartbeat);
            // the first tick fires immediately; the join already counts
            ticker.tick().await;

            loop {
                tokio::select! {
                    () = worker_cancel.cancelled() => {
                        reference += 1;
                        if let Ok(frame) = SocketFrame::leave(&topic, reference).encode() {
                            let _ = sink.send(Message::Text(frame)).await;
                        }
                        let _ = sink.send(Message::Close(None)).await;
                        debug!(topic = %topic, "realtime channel released");
                        break;
                    }
                    _ = ticker.tick() => {
                        reference += 1;
                        match SocketFrame::heartbeat(reference).encode() {
                            Ok(frame) => {
                                if sink.send(Message::Text(frame)).await.is_err() {
                                    warn!(topic = %topic, "heartbeat failed, closing channel");
                                    break;
                                }
                            }
                            Err(err) => {
                                warn!(error = %err, "heartbeat frame encoding failed");
                            }
                        }
                    }
                    incoming = stream.next() => {
                        match incoming {
                            Some(Ok(Message::Text(raw))) => {
                                let Ok(frame) = serde_json::from_str::<SocketFrame>(&raw) else {
                                    debug!(topic = %topic, "ignoring undecodable frame");
                                    continue;
                                };
                                if frame.topic != topic {
                                    continue;
                                }
                                if let Some(record) = frame.insert_record() {
                                    if tx.try_send(record).is_err() {
                                        // receiver gone or buffer full; a
                                        // missed event is dropped, a gone
                                        // receiver ends the channel
                                        if tx.is_closed() {
                                            break;
                                        }
                                        warn!(topic = %topic, "event buffer full, dropping insert");
                                    }
                                }
                            }
                            Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                            Some(Ok(Message::Close(_))) | None => {
                                debug!(topic = %topic, "realtime socket closed by peer");
                                break;
                            }
                            Some(Ok(_)) => {}
                            Some(Err(err)) => {
                                warn!(topic = %topic, error = %err, "realtime socket error");
                                break;
                            }
                        }
                    }
                }
            }
        });

        Ok(InsertFeed { events: rx, cancel })
    }
}

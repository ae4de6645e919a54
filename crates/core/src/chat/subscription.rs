//! Live zone subscription handle

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle representing one client's interest in one zone's message stream.
///
/// Owns the realtime channel (via its cancellation token) and the task that
/// forwards normalized messages to the caller's callback. Dropping the
/// handle tears both down; after [`ZoneSubscription::dispose`] returns, the
/// callback will not fire for any later event.
///
/// At most one live handle per (client, zone) pair is the caller's
/// obligation; opening a second channel for the same zone without disposing
/// the first leaks a channel server-side.
#[derive(Debug)]
pub struct ZoneSubscription {
    zone: String,
    cancel: CancellationToken,
    forwarder: JoinHandle<()>,
}

impl ZoneSubscription {
    pub(crate) fn new(zone: String, cancel: CancellationToken, forwarder: JoinHandle<()>) -> Self {
        Self { zone, cancel, forwarder }
    }

    /// Zone this subscription is scoped to.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Release the channel and stop forwarding events.
    pub fn dispose(self) {
        // Drop does the work; taking `self` by value makes the intent
        // explicit at call sites.
        drop(self);
    }
}

impl Drop for ZoneSubscription {
    fn drop(&mut self) {
        debug!(zone = %self.zone, "disposing zone subscription");
        self.cancel.cancel();
        // Aborting guarantees no callback runs for events that were still
        // queued when the handle was released.
        self.forwarder.abort();
    }
}

//! Customer display channel
//!
//! Every cart mutation and state transition publishes a complete snapshot
//! on a broadcast channel. Publishing is fire-and-forget: the session never
//! depends on a display being connected, and a display that joins
//! mid-session renders from its first received event.

use shared::order::{CartEvent, CartEventKind, CartSnapshot};
use tokio::sync::broadcast;

/// Display channel capacity; a slow display drops old frames rather than
/// back-pressuring the register
const CART_CHANNEL_CAPACITY: usize = 256;

/// Broadcast handle for cart events
#[derive(Debug, Clone)]
pub struct CartBroadcaster {
    event_tx: broadcast::Sender<CartEvent>,
}

impl CartBroadcaster {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(CART_CHANNEL_CAPACITY);
        Self { event_tx }
    }

    /// Subscribe a display (or any other mirror) to cart events
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.event_tx.subscribe()
    }

    /// Number of currently attached subscribers, used for the
    /// "display connected" indicator on the register
    pub fn receiver_count(&self) -> usize {
        self.event_tx.receiver_count()
    }

    /// Publish an event; absent subscribers are not an error
    pub fn publish(&self, kind: CartEventKind, snapshot: CartSnapshot) {
        let event = CartEvent::new(kind, snapshot);
        tracing::debug!(kind = %event.kind, items = event.snapshot.item_count, "cart event");
        let _ = self.event_tx.send(event);
    }
}

impl Default for CartBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_published_events() {
        let broadcaster = CartBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.publish(CartEventKind::LineAdded, CartSnapshot::empty());

        let event = rx.recv().await.unwrap();
        assert_eq!(event.kind, CartEventKind::LineAdded);
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let broadcaster = CartBroadcaster::new();
        assert_eq!(broadcaster.receiver_count(), 0);
        broadcaster.publish(CartEventKind::CartCleared, CartSnapshot::empty());
    }

    #[test]
    fn test_receiver_count_tracks_attachment() {
        let broadcaster = CartBroadcaster::new();
        let rx = broadcaster.subscribe();
        assert_eq!(broadcaster.receiver_count(), 1);
        drop(rx);
        assert_eq!(broadcaster.receiver_count(), 0);
    }
}

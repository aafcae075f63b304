//! Real-time donor notification fan-out.
//!
//! A transient map of per-user broadcast channels. Publishing is
//! fire-and-forget: no persistence, no replay for late subscribers, and a
//! publish with no subscribers is silently dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::{broadcast, RwLock};

/// Buffered events per subscriber before the oldest are overwritten.
const CHANNEL_CAPACITY: usize = 32;

/// Event type emitted when a donation completes verification.
pub const DONATION_COMPLETED: &str = "donation-completed";

/// Channel name surfaced to clients for a user's donor topic.
pub fn donor_channel(user_id: i64) -> String {
    format!("donor-{}", user_id)
}

/// An event on a donor channel.
#[derive(Clone, Debug, Serialize)]
pub struct DonorEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Default)]
pub struct DonorNotifier {
    channels: RwLock<HashMap<i64, broadcast::Sender<DonorEvent>>>,
}

impl DonorNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the caller to `donor-<user_id>`, creating the channel on first
    /// use. Only events published after this call are received.
    pub async fn subscribe(&self, user_id: i64) -> broadcast::Receiver<DonorEvent> {
        let mut channels = self.channels.write().await;
        channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Broadcasts to all current subscribers of the user's channel.
    /// At-most-once: delivery failures and absent channels are ignored.
    pub async fn publish(&self, user_id: i64, event_type: &str, data: serde_json::Value) {
        let channels = self.channels.read().await;
        if let Some(sender) = channels.get(&user_id) {
            let _ = sender.send(DonorEvent {
                event_type: event_type.to_string(),
                data,
                timestamp: Utc::now(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let notifier = DonorNotifier::new();
        let mut rx = notifier.subscribe(7).await;
        notifier.publish(7, DONATION_COMPLETED, json!({"amount": 500})).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, DONATION_COMPLETED);
        assert_eq!(event.data["amount"], 500);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_dropped() {
        let notifier = DonorNotifier::new();
        // Must not panic or block.
        notifier.publish(1, DONATION_COMPLETED, json!({})).await;

        // A late subscriber sees nothing from before it joined.
        let mut rx = notifier.subscribe(1).await;
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn channels_are_isolated_per_user() {
        let notifier = DonorNotifier::new();
        let mut rx_a = notifier.subscribe(1).await;
        let mut rx_b = notifier.subscribe(2).await;

        notifier.publish(1, DONATION_COMPLETED, json!({"for": "a"})).await;

        assert_eq!(rx_a.recv().await.unwrap().data["for"], "a");
        assert!(matches!(
            rx_b.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn channel_names_match_client_convention() {
        assert_eq!(donor_channel(42), "donor-42");
    }
}

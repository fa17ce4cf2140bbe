use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tracing::debug;

use tc_core::ports::{DeliveryError, MessageBusPort};
use tc_core::Endpoint;

const MAILBOX_CAPACITY: usize = 64;

/// Routes JSON messages to per-endpoint mailboxes.
///
/// A send to an endpoint nobody registered fails immediately; a send to a full
/// mailbox gives up after the configured timeout.
pub struct InProcessMessageBus {
    routes: RwLock<HashMap<Endpoint, mpsc::Sender<Value>>>,
    send_timeout: Duration,
}

impl InProcessMessageBus {
    pub fn new(send_timeout: Duration) -> Self {
        Self {
            routes: RwLock::new(HashMap::new()),
            send_timeout,
        }
    }

    /// Open a mailbox for `endpoint`, replacing any previous one.
    pub fn register(&self, endpoint: Endpoint) -> mpsc::Receiver<Value> {
        let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);
        if let Ok(mut routes) = self.routes.write() {
            routes.insert(endpoint, tx);
        }
        debug!(%endpoint, "registered endpoint");
        rx
    }

    fn route(&self, endpoint: Endpoint) -> Option<mpsc::Sender<Value>> {
        self.routes.read().ok()?.get(&endpoint).cloned()
    }

    /// Remove `endpoint` only while it still points at the `closed` mailbox.
    fn drop_closed_route(&self, endpoint: Endpoint, closed: &mpsc::Sender<Value>) {
        if let Ok(mut routes) = self.routes.write() {
            if routes
                .get(&endpoint)
                .is_some_and(|current| current.same_channel(closed))
            {
                routes.remove(&endpoint);
                debug!(%endpoint, "dropped closed endpoint");
            }
        }
    }
}

#[async_trait]
impl MessageBusPort for InProcessMessageBus {
    async fn send(&self, target: Endpoint, message: Value) -> Result<(), DeliveryError> {
        let sender = self.route(target).ok_or(DeliveryError::NoReceiver(target))?;

        match sender.send_timeout(message, self.send_timeout).await {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(_)) => Err(DeliveryError::Timeout(target)),
            Err(SendTimeoutError::Closed(_)) => {
                self.drop_closed_route(target, &sender);
                Err(DeliveryError::Closed(target))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tc_core::TabId;

    fn bus() -> InProcessMessageBus {
        InProcessMessageBus::new(Duration::from_millis(20))
    }

    #[tokio::test]
    async fn delivers_to_registered_endpoint() {
        let bus = bus();
        let mut rx = bus.register(Endpoint::Tab(TabId(3)));

        bus.send(Endpoint::Tab(TabId(3)), json!({"type": "paste-text", "text": "x"}))
            .await
            .unwrap();

        assert_eq!(rx.recv().await.unwrap()["text"], "x");
    }

    #[tokio::test]
    async fn unregistered_endpoint_has_no_receiver() {
        let err = bus()
            .send(Endpoint::Background, json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, DeliveryError::NoReceiver(Endpoint::Background));
    }

    #[tokio::test]
    async fn dropped_receiver_reports_closed_then_no_receiver() {
        let bus = bus();
        let tab = Endpoint::Tab(TabId(7));
        drop(bus.register(tab));

        let first = bus.send(tab, json!({})).await.unwrap_err();
        let second = bus.send(tab, json!({})).await.unwrap_err();

        assert_eq!(first, DeliveryError::Closed(tab));
        assert_eq!(second, DeliveryError::NoReceiver(tab));
    }

    #[tokio::test]
    async fn full_mailbox_times_out() {
        let bus = bus();
        let _rx = bus.register(Endpoint::Background);
        for _ in 0..MAILBOX_CAPACITY {
            bus.send(Endpoint::Background, json!({})).await.unwrap();
        }

        let err = bus.send(Endpoint::Background, json!({})).await.unwrap_err();
        assert_eq!(err, DeliveryError::Timeout(Endpoint::Background));
    }

    #[tokio::test]
    async fn closed_mailbox_does_not_evict_a_fresh_registration() {
        let bus = bus();
        let tab = Endpoint::Tab(TabId(9));
        let stale_rx = bus.register(tab);
        let stale = bus.route(tab).unwrap();
        drop(stale_rx);

        let mut fresh_rx = bus.register(tab);
        bus.drop_closed_route(tab, &stale);

        bus.send(tab, json!({"text": "still routed"})).await.unwrap();
        assert_eq!(fresh_rx.recv().await.unwrap()["text"], "still routed");
    }
}

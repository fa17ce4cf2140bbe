use async_trait::async_trait;
use serde_json::Value;

use super::errors::DeliveryError;
use crate::ids::TabId;
use crate::relay::Endpoint;

/// Inter-context message bus.
///
/// Messages are raw JSON objects tagged by `type`. Sends never wait on an
/// acknowledgment from the receiver and must fail instead of hanging when
/// nobody is listening.
#[async_trait]
pub trait MessageBusPort: Send + Sync {
    async fn send(&self, target: Endpoint, message: Value) -> Result<(), DeliveryError>;
}

/// Tab lookup as seen from the background context.
#[async_trait]
pub trait TabsPort: Send + Sync {
    /// The active tab in the current window, if any.
    async fn active_tab(&self) -> Result<Option<TabId>, DeliveryError>;
}

use std::sync::Arc;

use tracing::{debug, warn};

use tc_core::ports::{DeliveryError, MessageBusPort, PagePort};
use tc_core::{Endpoint, RelayMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Sent,
    NothingToSend,
    Dropped(DeliveryError),
}

/// Page side of capture: turn a copy event into a `clipboard-copy` message
/// for the background context. Fire-and-forget, a dropped message is lost.
pub struct CaptureRelay {
    page: Arc<dyn PagePort>,
    bus: Arc<dyn MessageBusPort>,
}

impl CaptureRelay {
    pub fn new(page: Arc<dyn PagePort>, bus: Arc<dyn MessageBusPort>) -> Self {
        Self { page, bus }
    }

    /// Text the copy event should capture.
    ///
    /// The page selection wins; the event's own plain-text payload is the
    /// fallback.
    pub fn observed_text(&self, event_plain_text: Option<&str>) -> Option<String> {
        let selection = self.page.selection_text();
        if !selection.is_empty() {
            return Some(selection);
        }
        event_plain_text
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }

    pub async fn on_copy(&self, event_plain_text: Option<&str>) -> CaptureOutcome {
        let Some(text) = self.observed_text(event_plain_text) else {
            debug!("copy event carried no text");
            return CaptureOutcome::NothingToSend;
        };

        let message = RelayMessage::clipboard_copy(text, self.page.location());
        match self.bus.send(Endpoint::Background, message.to_value()).await {
            Ok(()) => CaptureOutcome::Sent,
            Err(err) => {
                warn!(error = %err, "failed to relay captured text");
                CaptureOutcome::Dropped(err)
            }
        }
    }
}

use std::sync::Arc;

use tracing::{debug, error, info, info_span, Instrument};

use tc_core::ports::{DeliveryError, MessageBusPort, PagePort, SystemClipboardPort, TabsPort};
use tc_core::{Endpoint, RelayMessage, TabId};

use crate::usecases::history::HistoryEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Sent(TabId),
    EmptyHistory,
    NoActiveTab,
    Dropped(DeliveryError),
}

/// Background side of playback: send the newest item's text to the active tab.
///
/// Failures are logged and reported in the outcome, never raised.
pub struct PasteLastItem {
    history: Arc<HistoryEngine>,
    tabs: Arc<dyn TabsPort>,
    bus: Arc<dyn MessageBusPort>,
}

impl PasteLastItem {
    pub fn new(
        history: Arc<HistoryEngine>,
        tabs: Arc<dyn TabsPort>,
        bus: Arc<dyn MessageBusPort>,
    ) -> Self {
        Self { history, tabs, bus }
    }

    pub async fn execute(&self) -> PlaybackOutcome {
        let span = info_span!("usecase.paste_last_item.execute");

        async {
            let Some(latest) = self.history.latest().await else {
                debug!("history is empty, nothing to paste");
                return PlaybackOutcome::EmptyHistory;
            };

            let tab = match self.tabs.active_tab().await {
                Ok(Some(tab)) => tab,
                Ok(None) => {
                    debug!("no active tab");
                    return PlaybackOutcome::NoActiveTab;
                }
                Err(err) => {
                    error!(error = %err, "failed to resolve active tab");
                    return PlaybackOutcome::Dropped(err);
                }
            };

            let message = RelayMessage::paste_text(latest.text);
            match self.bus.send(Endpoint::Tab(tab), message.to_value()).await {
                Ok(()) => {
                    info!(tab = %tab, item_id = %latest.id, "sent paste message");
                    PlaybackOutcome::Sent(tab)
                }
                Err(err) => {
                    error!(error = %err, tab = %tab, "failed to send paste message");
                    PlaybackOutcome::Dropped(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Spliced into the focused text element.
    Spliced,
    /// Written to the system clipboard and pasted by the page.
    PastedViaClipboard,
}

/// Page side of playback: put text where the user is typing.
pub struct InsertText {
    page: Arc<dyn PagePort>,
    clipboard: Arc<dyn SystemClipboardPort>,
}

impl InsertText {
    pub fn new(page: Arc<dyn PagePort>, clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        Self { page, clipboard }
    }

    pub async fn execute(&self, text: &str) -> anyhow::Result<InsertOutcome> {
        if self.page.focused_element().accepts_text() {
            if let Some(input) = self.page.read_text_input() {
                self.page.commit_text_input(input.splice(text));
                return Ok(InsertOutcome::Spliced);
            }
        }

        self.clipboard.write_text(text).await?;
        self.page.exec_paste().await?;
        Ok(InsertOutcome::PastedViaClipboard)
    }
}

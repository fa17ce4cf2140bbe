//! Keeps a context's mirrors eventually consistent with the store.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use tc_core::ports::{StoreChange, CLIPBOARD_HISTORY_KEY, SNIPPETS_KEY};

use super::history::HistoryEngine;
use super::snippets::SnippetBook;

#[derive(Clone)]
pub struct ChangeSync {
    history: Arc<HistoryEngine>,
    snippets: Arc<SnippetBook>,
    area: String,
}

impl ChangeSync {
    pub fn new(history: Arc<HistoryEngine>, snippets: Arc<SnippetBook>, area: impl Into<String>) -> Self {
        Self {
            history,
            snippets,
            area: area.into(),
        }
    }

    /// Route one notification to the mirrors it touches.
    ///
    /// Notifications from another storage area are ignored.
    pub async fn apply(&self, change: StoreChange) {
        if change.area != self.area {
            debug!(area = %change.area, "ignoring change from another storage area");
            return;
        }

        let StoreChange { mut changes, .. } = change;
        if let Some(snippets) = changes.remove(SNIPPETS_KEY) {
            self.snippets.sync_from_notification(snippets.new_value).await;
        }
        if let Some(history) = changes.remove(CLIPBOARD_HISTORY_KEY) {
            self.history.apply_notification(history.new_value).await;
        }
    }

    /// Full reload of both records.
    pub async fn resync(&self) {
        if let Err(err) = self.snippets.resync().await {
            error!(error = %err, "failed to reload snippets");
        }
        if let Err(err) = self.history.resync().await {
            error!(error = %err, "failed to reload clipboard history");
        }
    }

    /// Consume `rx` until the store goes away.
    pub async fn run(self, mut rx: broadcast::Receiver<StoreChange>) {
        loop {
            match rx.recv().await {
                Ok(change) => self.apply(change).await,
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "change feed lagged");
                    self.resync().await;
                }
                Err(RecvError::Closed) => {
                    info!("change feed closed");
                    break;
                }
            }
        }
    }

    pub fn spawn(self, rx: broadcast::Receiver<StoreChange>) -> JoinHandle<()> {
        tokio::spawn(self.run(rx))
    }
}

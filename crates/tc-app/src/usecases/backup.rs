use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use tc_core::clipboard::{export_backup, parse_backup};

use super::history::HistoryEngine;
use crate::errors::EngineError;

/// Serialise the current history as pretty-printed JSON.
pub struct BackupHistory {
    history: Arc<HistoryEngine>,
}

impl BackupHistory {
    pub fn new(history: Arc<HistoryEngine>) -> Self {
        Self { history }
    }

    pub async fn execute(&self) -> Result<String, EngineError> {
        let items = self.history.get_all().await;
        let text = export_backup(&items)?;
        info!(items = items.len(), "exported clipboard history");
        Ok(text)
    }
}

/// Parse backup text and replace the history with it.
///
/// Text that is not a JSON array of items is rejected before anything is
/// written.
pub struct RestoreHistory {
    history: Arc<HistoryEngine>,
}

impl RestoreHistory {
    pub fn new(history: Arc<HistoryEngine>) -> Self {
        Self { history }
    }

    pub async fn execute(&self, text: &str) -> Result<usize, EngineError> {
        let span = info_span!("usecase.restore_history.execute", bytes = text.len());

        async {
            let items = parse_backup(text).map_err(|err| {
                warn!(error = %err, "rejected backup text");
                err
            })?;
            self.history.restore(items).await?;
            Ok(self.history.len().await)
        }
        .instrument(span)
        .await
    }
}

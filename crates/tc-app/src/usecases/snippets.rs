use std::sync::Arc;

use serde_json::Value;
use tracing::{info, info_span, warn, Instrument};

use tc_core::ports::{StoreError, StorePort, SNIPPETS_KEY};
use tc_core::SnippetTable;

use crate::errors::EngineError;
use crate::mirror::{RecordMirror, StoredRecord};

impl StoredRecord for SnippetTable {
    const KEY: &'static str = SNIPPETS_KEY;

    fn decode(value: Value, _current: &Self) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_else(|err| {
                warn!(error = %err, "stored snippets are unreadable, treating as empty");
                SnippetTable::new()
            }),
            Value::Null => SnippetTable::new(),
            _ => {
                warn!("stored snippets are not an object, treating as empty");
                SnippetTable::new()
            }
        }
    }

    fn encode(&self) -> Result<Value, StoreError> {
        serde_json::to_value(self).map_err(|e| StoreError::Serialization {
            key: SNIPPETS_KEY.to_string(),
            reason: e.to_string(),
        })
    }
}

/// This context's copy of the snippet table.
///
/// The background context never reloads snippets on capture; change
/// notifications are the only way it learns about edits made in the popup.
pub struct SnippetBook {
    mirror: RecordMirror<SnippetTable>,
}

impl SnippetBook {
    pub fn new(store: Arc<dyn StorePort>) -> Self {
        Self {
            mirror: RecordMirror::new(store, SnippetTable::new()),
        }
    }

    pub async fn load(&self) -> Result<(), StoreError> {
        self.mirror.load().await
    }

    /// Upsert `key -> value` and write the whole table through.
    ///
    /// Both sides are trimmed; blank input is rejected without a write.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), EngineError> {
        let span = info_span!("usecase.snippets.set", key = key.trim());

        async {
            self.mirror
                .write_through(|table| {
                    table.set(key, value)?;
                    Ok(Some(()))
                })
                .await?;
            info!(key = key.trim(), "saved snippet");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Expansion for `text`, or `text` itself when no key matches.
    pub async fn expand(&self, text: &str) -> String {
        self.mirror.read(|table| table.expand(text).to_string()).await
    }

    pub async fn snapshot(&self) -> SnippetTable {
        self.mirror.snapshot().await
    }

    /// Replace the table from a change notification made elsewhere.
    pub async fn sync_from_notification(&self, new_value: Option<Value>) {
        self.mirror.apply_notification(new_value).await;
    }

    pub async fn resync(&self) -> Result<(), StoreError> {
        self.mirror.resync().await
    }
}

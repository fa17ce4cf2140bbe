use serde_json::Value;
use tracing::warn;

use tc_core::ports::{StoreError, CLIPBOARD_HISTORY_KEY};
use tc_core::{ClipboardHistory, ClipboardItem};

use crate::mirror::StoredRecord;

impl StoredRecord for ClipboardHistory {
    const KEY: &'static str = CLIPBOARD_HISTORY_KEY;

    fn decode(value: Value, current: &Self) -> Self {
        let Value::Array(entries) = value else {
            if !value.is_null() {
                warn!("stored clipboard history is not an array, treating as empty");
            }
            return ClipboardHistory::with_capacity(current.max_items());
        };

        let items = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<ClipboardItem>(entry) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(error = %err, "dropping unreadable clipboard history entry");
                    None
                }
            })
            .collect();

        ClipboardHistory::from_stored(items, current.max_items())
    }

    fn encode(&self) -> Result<Value, StoreError> {
        serde_json::to_value(self.items()).map_err(|e| StoreError::Serialization {
            key: CLIPBOARD_HISTORY_KEY.to_string(),
            reason: e.to_string(),
        })
    }
}

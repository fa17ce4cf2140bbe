use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// One captured clipboard entry.
///
/// `text` is stored after snippet expansion. `timestamp` is display-only;
/// the position in [`ClipboardHistory`](super::ClipboardHistory) is what
/// orders entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardItem {
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub favorite: bool,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,
}

impl ClipboardItem {
    pub fn new(id: ItemId, text: impl Into<String>, url: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            text: text.into(),
            url: url.into(),
            favorite: false,
            timestamp,
        }
    }

    /// Creation time as a UTC datetime, `None` for items restored without one.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        if self.timestamp <= 0 {
            return None;
        }
        Utc.timestamp_millis_opt(self.timestamp).single()
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

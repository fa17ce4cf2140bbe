//! Backup text format: a pretty-printed JSON array of items, unversioned.

use serde_json::Value;
use thiserror::Error;

use super::history::HistoryError;
use super::item::ClipboardItem;
use crate::ids::ItemId;

/// Reasons a backup text is rejected. All of them are "invalid backup format"
/// from the user's point of view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackupError {
    #[error("backup is not a JSON array")]
    NotAnArray,

    #[error("backup is not valid JSON: {0}")]
    Malformed(String),

    #[error("backup entry is not a clipboard item: {0}")]
    InvalidItem(String),

    #[error("backup contains duplicate id: {0}")]
    DuplicateId(ItemId),

    #[error("failed to serialize backup: {0}")]
    Serialize(String),
}

impl From<HistoryError> for BackupError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::DuplicateId(id) => BackupError::DuplicateId(id),
        }
    }
}

pub fn export_backup(items: &[ClipboardItem]) -> Result<String, BackupError> {
    serde_json::to_string_pretty(items).map_err(|e| BackupError::Serialize(e.to_string()))
}

/// Parse backup text into an ordered item list.
///
/// The top-level value must be an array; anything else (an object, a string,
/// unparseable text) is rejected before any item is looked at.
pub fn parse_backup(text: &str) -> Result<Vec<ClipboardItem>, BackupError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| BackupError::Malformed(e.to_string()))?;

    if !value.is_array() {
        return Err(BackupError::NotAnArray);
    }

    serde_json::from_value(value).map_err(|e| BackupError::InvalidItem(e.to_string()))
}

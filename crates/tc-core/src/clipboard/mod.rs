//! Clipboard history domain models.
mod backup;
mod history;
mod item;
mod view;

pub use backup::{export_backup, parse_backup, BackupError};
pub use history::{ClipboardHistory, HistoryError, DEFAULT_MAX_HISTORY_ITEMS};
pub use item::ClipboardItem;
pub use view::{HistoryFilter, HistoryRow, HistoryView, EMPTY_HISTORY_PLACEHOLDER};

#[cfg(test)]
mod tests;

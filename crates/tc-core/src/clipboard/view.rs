//! Read-only projection of the history for the popup list.
//!
//! Pure function of (history, filter). No rendering happens here; the
//! presentation layer consumes [`HistoryView`] as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::ClipboardItem;
use crate::ids::ItemId;

pub const EMPTY_HISTORY_PLACEHOLDER: &str = "No clipboard history yet.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFilter {
    /// Show favorites only.
    pub favorites_only: bool,
    /// Case-insensitive substring over text and url. Empty means no search.
    pub search: String,
}

impl HistoryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn favorites() -> Self {
        Self {
            favorites_only: true,
            search: String::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn matches(&self, item: &ClipboardItem) -> bool {
        if self.favorites_only && !item.favorite {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        item.text.to_lowercase().contains(&needle)
            || (item.has_url() && item.url.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub id: ItemId,
    pub text: String,
    /// Source page, rendered as a "jump" link when present.
    pub jump_url: Option<String>,
    pub favorite: bool,
    pub captured_at: Option<DateTime<Utc>>,
}

impl From<&ClipboardItem> for HistoryRow {
    fn from(item: &ClipboardItem) -> Self {
        Self {
            id: item.id.clone(),
            text: item.text.clone(),
            jump_url: item.has_url().then(|| item.url.clone()),
            favorite: item.favorite,
            captured_at: item.captured_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    pub rows: Vec<HistoryRow>,
}

impl HistoryView {
    /// Project `items` (newest-first) through `filter`, keeping order.
    pub fn project(items: &[ClipboardItem], filter: &HistoryFilter) -> Self {
        Self {
            rows: items
                .iter()
                .filter(|item| filter.matches(item))
                .map(HistoryRow::from)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text shown instead of the list when nothing matches.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_HISTORY_PLACEHOLDER)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.rows.iter().map(|row| &row.id)
    }
}

//! The bounded, newest-first history list.
//!
//! Invariants held by every [`ClipboardHistory`] value:
//! - index 0 is the newest item, insertion only happens at the head;
//! - `len() <= max_items`, overflow evicts from the tail;
//! - every `id` appears at most once.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use super::item::ClipboardItem;
use crate::ids::ItemId;

pub const DEFAULT_MAX_HISTORY_ITEMS: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("duplicate item id: {0}")]
    DuplicateId(ItemId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClipboardHistory {
    items: Vec<ClipboardItem>,
    #[serde(skip)]
    max_items: usize,
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY_ITEMS)
    }
}

impl ClipboardHistory {
    pub fn with_capacity(max_items: usize) -> Self {
        Self {
            items: Vec::new(),
            max_items: max_items.max(1),
        }
    }

    /// Build a history from an ordered (newest-first) list.
    ///
    /// Rejects duplicate ids. Entries beyond the cap are dropped from the tail.
    pub fn from_items(items: Vec<ClipboardItem>, max_items: usize) -> Result<Self, HistoryError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(HistoryError::DuplicateId(item.id.clone()));
            }
        }

        let mut history = Self::with_capacity(max_items);
        history.items = items;
        let evicted = history.evict_overflow();
        if !evicted.is_empty() {
            tracing::debug!(evicted = evicted.len(), max_items = history.max_items, "truncated history to cap");
        }
        Ok(history)
    }

    /// Lenient variant used when mirroring whatever the store holds.
    ///
    /// Later duplicates of an id are dropped instead of failing, so a mirror
    /// never holds the same id twice.
    pub fn from_stored(items: Vec<ClipboardItem>, max_items: usize) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let mut history = Self::with_capacity(max_items);
        history.items = items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .collect();
        history.evict_overflow();
        history
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ClipboardItem> {
        self.items
    }

    /// The most recently captured item.
    pub fn latest(&self) -> Option<&ClipboardItem> {
        self.items.first()
    }

    pub fn get(&self, id: &ItemId) -> Option<&ClipboardItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Insert at the head and return whatever fell off the tail.
    ///
    /// If the id is already present the older copy is dropped first.
    pub fn push_front(&mut self, item: ClipboardItem) -> Vec<ClipboardItem> {
        self.items.retain(|existing| existing.id != item.id);
        self.items.insert(0, item);
        self.evict_overflow()
    }

    /// Remove by id. Returns `false` when the id was not present.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Remove every item whose id is in `ids`, returning how many were removed.
    pub fn remove_many(&mut self, ids: &HashSet<ItemId>) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !ids.contains(&item.id));
        before - self.items.len()
    }

    /// Flip the favorite flag, returning the new value.
    pub fn toggle_favorite(&mut self, id: &ItemId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| &item.id == id)?;
        item.favorite = !item.favorite;
        Some(item.favorite)
    }

    fn evict_overflow(&mut self) -> Vec<ClipboardItem> {
        if self.items.len() > self.max_items {
            self.items.split_off(self.max_items)
        } else {
            Vec::new()
        }
    }
}

//! Persistent store capability.
//!
//! An asynchronous key-value store shared by every context. Writes replace a
//! whole top-level record atomically; there is no field-level merge, so the
//! last writer of a record wins.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use super::errors::StoreError;

/// Record holding the history list.
pub const CLIPBOARD_HISTORY_KEY: &str = "clipboardHistory";
/// Record holding the snippet map.
pub const SNIPPETS_KEY: &str = "snippets";

#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

/// One change notification: every key touched by a single `set`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreChange {
    pub area: String,
    pub changes: HashMap<String, ValueChange>,
}

impl StoreChange {
    pub fn get(&self, key: &str) -> Option<&ValueChange> {
        self.changes.get(key)
    }
}

#[async_trait]
pub trait StorePort: Send + Sync {
    /// Fetch the requested keys. Missing keys are simply absent from the map.
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, StoreError>;

    /// Replace every given key atomically, then notify subscribers.
    async fn set(&self, items: HashMap<String, Value>) -> Result<(), StoreError>;

    /// Subscribe to change notifications from every writer.
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;

    /// Area name carried by this store's notifications.
    fn area(&self) -> &str;
}

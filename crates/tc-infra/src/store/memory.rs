use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use tc_core::ports::{StoreChange, StoreError, StorePort};

use super::{apply_items, pick, CHANGE_FEED_CAPACITY};

/// Process-local store. Used by tests and by contexts that do not persist.
pub struct InMemoryStore {
    area: String,
    records: Mutex<HashMap<String, Value>>,
    changes: broadcast::Sender<StoreChange>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_area(tc_core::config::DEFAULT_STORAGE_AREA)
    }

    pub fn with_area(area: impl Into<String>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            area: area.into(),
            records: Mutex::new(HashMap::new()),
            changes,
            writes: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Put a raw value in place without notifying anyone.
    pub fn seed(&self, key: &str, value: Value) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(key.to_string(), value);
        }
    }

    /// Raw value currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<Value> {
        self.records.lock().ok()?.get(key).cloned()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every following `set` fail until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every following `get` fail until switched off again.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorePort for InMemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("reads disabled".to_string()));
        }

        let records = self
            .records
            .lock()
            .map_err(|e| StoreError::Read(e.to_string()))?;
        Ok(pick(&records, keys))
    }

    async fn set(&self, items: HashMap<String, Value>) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("writes disabled".to_string()));
        }

        let mut records = self
            .records
            .lock()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        let change = apply_items(&mut records, &self.area, items);
        self.writes.fetch_add(1, Ordering::SeqCst);
        // Sent under the lock so subscribers observe writes in order.
        let _ = self.changes.send(change);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    fn area(&self) -> &str {
        &self.area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_notifies_with_old_and_new_values() {
        let store = InMemoryStore::new();
        let mut rx = store.subscribe();

        store
            .set(HashMap::from([("k".to_string(), json!(1))]))
            .await
            .unwrap();
        store
            .set(HashMap::from([("k".to_string(), json!(2))]))
            .await
            .unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.area, "local");
        assert_eq!(first.get("k").unwrap().old_value, None);

        let second = rx.recv().await.unwrap();
        let change = second.get("k").unwrap();
        assert_eq!(change.old_value, Some(json!(1)));
        assert_eq!(change.new_value, Some(json!(2)));
    }

    #[tokio::test]
    async fn get_omits_missing_keys() {
        let store = InMemoryStore::new();
        store.seed("present", json!("x"));

        let values = store.get(&["present", "absent"]).await.unwrap();

        assert_eq!(values.len(), 1);
        assert_eq!(values["present"], json!("x"));
    }

    #[tokio::test]
    async fn failed_write_changes_nothing() {
        let store = InMemoryStore::new();
        let mut rx = store.subscribe();
        store.fail_writes(true);

        let err = store
            .set(HashMap::from([("k".to_string(), json!(1))]))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Write(_)));
        assert_eq!(store.write_count(), 0);
        assert!(store.raw("k").is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_read_reports_read_error() {
        let store = InMemoryStore::new();
        store.seed("k", json!(1));
        store.fail_reads(true);

        let err = store.get(&["k"]).await.unwrap_err();
        assert!(matches!(err, StoreError::Read(_)));

        store.fail_reads(false);
        assert_eq!(store.get(&["k"]).await.unwrap()["k"], json!(1));
    }
}

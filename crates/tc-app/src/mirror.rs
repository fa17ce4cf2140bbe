//! Per-context mirror of one persisted record.
//!
//! Every mutation is a read-modify-write cycle against the store: the closure
//! runs on a copy of the mirror, the copy is written, and only a successful
//! write is committed back. Cycles inside one context are serialised by the
//! mirror lock, which stays held across the store write.
//!
//! Change notifications arrive in store write order. Our own writes come back
//! as echoes; while any echo is still outstanding, the store's final value for
//! the record is ours, so foreign values seen before it are skipped instead of
//! rewinding the mirror.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use tc_core::ports::{StoreError, StorePort};

use crate::errors::EngineError;

/// A record stored under one top-level key.
pub trait StoredRecord: Clone + Send + Sync + 'static {
    const KEY: &'static str;

    /// Decode whatever the store holds. Shapes that cannot be read become an
    /// empty record; `current` supplies context such as capacity.
    fn decode(value: Value, current: &Self) -> Self;

    fn encode(&self) -> Result<Value, StoreError>;
}

struct MirrorState<T> {
    value: T,
    pending_echoes: VecDeque<Value>,
}

pub struct RecordMirror<T: StoredRecord> {
    store: Arc<dyn StorePort>,
    state: Mutex<MirrorState<T>>,
}

impl<T: StoredRecord> RecordMirror<T> {
    pub fn new(store: Arc<dyn StorePort>, initial: T) -> Self {
        Self {
            store,
            state: Mutex::new(MirrorState {
                value: initial,
                pending_echoes: VecDeque::new(),
            }),
        }
    }

    pub fn store(&self) -> &Arc<dyn StorePort> {
        &self.store
    }

    pub async fn snapshot(&self) -> T {
        self.state.lock().await.value.clone()
    }

    /// Run `f` against the current value without mutating it.
    pub async fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.lock().await.value)
    }

    /// Replace the mirror with the store's current value.
    pub async fn load(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let mut fetched = self.store.get(&[T::KEY]).await?;
        let value = fetched.remove(T::KEY).unwrap_or(Value::Null);
        state.value = T::decode(value, &state.value);
        state.pending_echoes.clear();
        Ok(())
    }

    /// Read-modify-write cycle.
    ///
    /// `f` returns `Ok(None)` to signal "nothing changed": no write happens.
    pub async fn write_through<R>(
        &self,
        f: impl FnOnce(&mut T) -> Result<Option<R>, EngineError>,
    ) -> Result<Option<R>, EngineError> {
        let mut state = self.state.lock().await;
        let mut next = state.value.clone();
        let Some(result) = f(&mut next)? else {
            return Ok(None);
        };

        let encoded = next.encode()?;
        state.pending_echoes.push_back(encoded.clone());

        let mut items = HashMap::with_capacity(1);
        items.insert(T::KEY.to_string(), encoded);
        if let Err(err) = self.store.set(items).await {
            state.pending_echoes.pop_back();
            return Err(err.into());
        }

        state.value = next;
        Ok(Some(result))
    }

    /// Fold a change notification for this record into the mirror.
    pub async fn apply_notification(&self, new_value: Option<Value>) {
        let value = new_value.unwrap_or(Value::Null);
        let mut state = self.state.lock().await;

        if state.pending_echoes.front() == Some(&value) {
            state.pending_echoes.pop_front();
            if state.pending_echoes.is_empty() {
                state.value = T::decode(value, &state.value);
            }
            return;
        }

        if !state.pending_echoes.is_empty() {
            debug!(
                key = T::KEY,
                pending = state.pending_echoes.len(),
                "skipping foreign change superseded by a pending local write"
            );
            return;
        }

        state.value = T::decode(value, &state.value);
    }

    /// Drop echo bookkeeping after the notification feed lost messages.
    pub async fn resync(&self) -> Result<(), StoreError> {
        warn!(key = T::KEY, "change feed lagged, reloading record from store");
        self.load().await
    }
}

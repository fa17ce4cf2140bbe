use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, info_span, warn, Instrument};

use tc_core::ports::{ClockPort, IdGeneratorPort, StoreError, StorePort};
use tc_core::{ClipboardHistory, ClipboardItem, ItemId};

use crate::errors::EngineError;
use crate::mirror::RecordMirror;
use crate::usecases::snippets::SnippetBook;

/// Owns this context's mirror of the history record.
///
/// Every mutation is written through to the store as the whole list; the
/// mirror only changes after the write succeeded, so a failed write leaves the
/// last known-good state in place.
///
/// Only the background context is expected to call [`add`](Self::add). The
/// popup performs delete/favorite/restore while it is open; those writes race
/// with captures on a last-write-wins basis.
pub struct HistoryEngine {
    mirror: RecordMirror<ClipboardHistory>,
    snippets: Arc<SnippetBook>,
    ids: Arc<dyn IdGeneratorPort>,
    clock: Arc<dyn ClockPort>,
}

impl HistoryEngine {
    pub fn new(
        store: Arc<dyn StorePort>,
        snippets: Arc<SnippetBook>,
        ids: Arc<dyn IdGeneratorPort>,
        clock: Arc<dyn ClockPort>,
        max_items: usize,
    ) -> Self {
        Self {
            mirror: RecordMirror::new(store, ClipboardHistory::with_capacity(max_items)),
            snippets,
            ids,
            clock,
        }
    }

    /// Populate the mirror from the store at context startup.
    pub async fn load(&self) -> Result<(), StoreError> {
        self.mirror.load().await?;
        let len = self.mirror.read(ClipboardHistory::len).await;
        debug!(items = len, "loaded clipboard history");
        Ok(())
    }

    /// Capture `text` at the head of the history.
    ///
    /// Empty text is ignored. Text equal to a snippet key is replaced by the
    /// snippet's expansion (one level only). Returns the new item's id.
    pub async fn add(&self, text: &str, url: &str) -> Result<Option<ItemId>, EngineError> {
        let span = info_span!("usecase.history.add", len = text.len());

        async {
            if text.is_empty() {
                return Ok(None);
            }

            let text = self.snippets.expand(text).await;
            let now_ms = self.clock.now_ms();
            let item = ClipboardItem::new(self.ids.next_id(now_ms), text, url, now_ms);
            let id = item.id.clone();

            let evicted = self
                .mirror
                .write_through(|history| Ok(Some(history.push_front(item))))
                .await?
                .unwrap_or_default();

            if !evicted.is_empty() {
                debug!(evicted = evicted.len(), "evicted oldest history items");
            }
            info!(item_id = %id, "captured clipboard item");
            Ok(Some(id))
        }
        .instrument(span)
        .await
    }

    /// Remove one item. Unknown ids are a no-op and cause no write.
    pub async fn delete(&self, id: &ItemId) -> Result<bool, EngineError> {
        let span = info_span!("usecase.history.delete", item_id = %id);

        async {
            let removed = self
                .mirror
                .write_through(|history| Ok(history.remove(id).then_some(())))
                .await?
                .is_some();

            if !removed {
                debug!("delete target not in history");
            }
            Ok(removed)
        }
        .instrument(span)
        .await
    }

    /// Remove every listed item in a single store write.
    pub async fn delete_many(&self, ids: &HashSet<ItemId>) -> Result<usize, EngineError> {
        let span = info_span!("usecase.history.delete_many", requested = ids.len());

        async {
            if ids.is_empty() {
                return Ok(0);
            }

            let removed = self
                .mirror
                .write_through(|history| {
                    let removed = history.remove_many(ids);
                    Ok((removed > 0).then_some(removed))
                })
                .await?
                .unwrap_or(0);

            info!(removed, "deleted clipboard items");
            Ok(removed)
        }
        .instrument(span)
        .await
    }

    /// Flip the favorite flag. Returns the new flag, `None` for unknown ids.
    pub async fn toggle_favorite(&self, id: &ItemId) -> Result<Option<bool>, EngineError> {
        let span = info_span!("usecase.history.toggle_favorite", item_id = %id);

        self.mirror
            .write_through(|history| Ok(history.toggle_favorite(id)))
            .instrument(span)
            .await
    }

    /// Replace the whole history with `items` (newest first).
    ///
    /// Duplicate ids make the input invalid; nothing is written and the
    /// current history stays as it was.
    pub async fn restore(&self, items: Vec<ClipboardItem>) -> Result<(), EngineError> {
        let span = info_span!("usecase.history.restore", items = items.len());

        async {
            self.mirror
                .write_through(|history| {
                    let max_items = history.max_items();
                    if items.len() > max_items {
                        warn!(items = items.len(), max_items, "restored history exceeds cap, truncating");
                    }
                    *history = ClipboardHistory::from_items(items, max_items)
                        .map_err(tc_core::clipboard::BackupError::from)?;
                    Ok(Some(()))
                })
                .await?;

            info!("restored clipboard history");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Current mirror, newest first. No store round-trip.
    pub async fn get_all(&self) -> Vec<ClipboardItem> {
        self.mirror.read(|history| history.items().to_vec()).await
    }

    pub async fn latest(&self) -> Option<ClipboardItem> {
        self.mirror.read(|history| history.latest().cloned()).await
    }

    pub async fn len(&self) -> usize {
        self.mirror.read(ClipboardHistory::len).await
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Fold a change notification for the history record into the mirror.
    pub async fn apply_notification(&self, new_value: Option<Value>) {
        self.mirror.apply_notification(new_value).await;
    }

    /// Reload after the change feed lost notifications.
    pub async fn resync(&self) -> Result<(), StoreError> {
        self.mirror.resync().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
    use tc_infra::store::InMemoryStore;

    struct FixedClock(AtomicI64);

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    struct CountingIds(AtomicU32);

    impl IdGeneratorPort for CountingIds {
        fn next_id(&self, now_ms: i64) -> ItemId {
            ItemId::compose(now_ms, self.0.fetch_add(1, Ordering::SeqCst), 0)
        }
    }

    fn engine_with(store: Arc<InMemoryStore>, max_items: usize) -> HistoryEngine {
        let store: Arc<dyn StorePort> = store;
        let snippets = Arc::new(SnippetBook::new(store.clone()));
        HistoryEngine::new(
            store,
            snippets,
            Arc::new(CountingIds(AtomicU32::new(0))),
            Arc::new(FixedClock(AtomicI64::new(1_000))),
            max_items,
        )
    }

    #[tokio::test]
    async fn add_records_timestamp_and_url() {
        let engine = engine_with(Arc::new(InMemoryStore::new()), 100);

        engine.add("hello", "https://example.com").await.unwrap();

        let items = engine.get_all().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://example.com");
        assert_eq!(items[0].timestamp, 1_000);
        assert!(!items[0].favorite);
    }

    #[tokio::test]
    async fn ids_stay_unique_within_one_millisecond() {
        let engine = engine_with(Arc::new(InMemoryStore::new()), 100);
        for _ in 0..50 {
            engine.add("same", "").await.unwrap();
        }
        let ids: HashSet<_> = engine.get_all().await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[tokio::test]
    async fn delete_many_with_no_match_does_not_write() {
        let store = Arc::new(InMemoryStore::new());
        let engine = engine_with(store.clone(), 100);
        engine.add("a", "").await.unwrap();
        let writes = store.write_count();

        let ids: HashSet<_> = [ItemId::from("missing")].into_iter().collect();
        assert_eq!(engine.delete_many(&ids).await.unwrap(), 0);
        assert_eq!(store.write_count(), writes);
    }

    #[tokio::test]
    async fn failed_write_keeps_last_good_mirror() {
        let store = Arc::new(InMemoryStore::new());
        let engine = engine_with(store.clone(), 100);
        engine.add("kept", "").await.unwrap();

        store.fail_writes(true);
        let err = engine.add("lost", "").await.unwrap_err();
        assert!(err.is_store_error());

        let items = engine.get_all().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "kept");
    }

    #[tokio::test]
    async fn restore_truncates_to_cap() {
        let engine = engine_with(Arc::new(InMemoryStore::new()), 2);
        let items = (0..5)
            .map(|n| ClipboardItem::new(ItemId::from(format!("id-{n}")), "t", "", 0))
            .collect();

        engine.restore(items).await.unwrap();

        let ids: Vec<_> = engine.get_all().await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId::from("id-0"), ItemId::from("id-1")]);
    }
}

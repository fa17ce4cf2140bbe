#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

use tc_app::usecases::ChangeSync;
use tc_app::{HistoryEngine, SnippetBook};
use tc_core::ports::{ClockPort, IdGeneratorPort, StoreChange, StorePort};
use tc_core::ItemId;
use tc_infra::store::InMemoryStore;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Strictly increasing fake clock starting at `start`.
pub struct TickingClock(AtomicI64);

impl TickingClock {
    pub fn new(start: i64) -> Self {
        Self(AtomicI64::new(start))
    }
}

impl ClockPort for TickingClock {
    fn now_ms(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

pub struct SequentialIds {
    next: AtomicU32,
    suffix: u32,
}

impl SequentialIds {
    pub fn new(suffix: u32) -> Self {
        Self {
            next: AtomicU32::new(0),
            suffix,
        }
    }
}

impl IdGeneratorPort for SequentialIds {
    fn next_id(&self, now_ms: i64) -> ItemId {
        ItemId::compose(now_ms, self.next.fetch_add(1, Ordering::SeqCst), self.suffix)
    }
}

/// One execution context wired to a shared store.
///
/// Notifications are drained explicitly with [`pump`](Self::pump) so tests
/// control exactly when a context observes foreign writes.
pub struct Context {
    pub history: Arc<HistoryEngine>,
    pub snippets: Arc<SnippetBook>,
    sync: ChangeSync,
    changes: broadcast::Receiver<StoreChange>,
}

impl Context {
    pub async fn attach(store: Arc<InMemoryStore>, max_items: usize, id_suffix: u32) -> Self {
        let changes = store.subscribe();
        let store: Arc<dyn StorePort> = store;
        let snippets = Arc::new(SnippetBook::new(store.clone()));
        let history = Arc::new(HistoryEngine::new(
            store.clone(),
            snippets.clone(),
            Arc::new(SequentialIds::new(id_suffix)),
            Arc::new(TickingClock::new(1_700_000_000_000)),
            max_items,
        ));
        snippets.load().await.unwrap();
        history.load().await.unwrap();

        let sync = ChangeSync::new(history.clone(), snippets.clone(), store.area());
        Self {
            history,
            snippets,
            sync,
            changes,
        }
    }

    /// Feed one notification as if it came from the store.
    pub async fn apply(&self, change: StoreChange) {
        self.sync.apply(change).await;
    }

    pub async fn pump(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            self.sync.apply(change).await;
        }
    }

    pub async fn texts(&self) -> Vec<String> {
        self.history
            .get_all()
            .await
            .into_iter()
            .map(|item| item.text)
            .collect()
    }
}

//! # Dependency wiring
//!
//! The only place that names concrete adapters. Everything handed to the
//! contexts is a port behind an `Arc`.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use tc_app::usecases::ChangeSync;
use tc_app::{HistoryEngine, SnippetBook};
use tc_core::config::AppConfig;
use tc_core::ports::{ClockPort, IdGeneratorPort, StoreError, StorePort};
use tc_infra::relay::{InProcessMessageBus, TabRegistry};
use tc_infra::store::{InMemoryStore, JsonFileStore};
use tc_infra::{SystemClock, TimestampIdGenerator};

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("store initialization failed: {0}")]
    StoreInit(#[from] StoreError),
}

/// Adapters shared by every context of one host process.
///
/// The bus and tab registry stay concrete: the host registers mailboxes and
/// opens tabs, which the ports deliberately do not expose.
#[derive(Clone)]
pub struct SharedServices {
    pub store: Arc<dyn StorePort>,
    pub bus: Arc<InProcessMessageBus>,
    pub tabs: Arc<TabRegistry>,
    pub clock: Arc<dyn ClockPort>,
    pub ids: Arc<dyn IdGeneratorPort>,
    pub max_history_items: usize,
}

impl SharedServices {
    /// Wire against the JSON file store named by `config`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, WiringError> {
        let store = JsonFileStore::open(&config.store_path, config.storage_area.clone()).await?;
        Ok(Self::with_store(Arc::new(store), config))
    }

    /// Wire against a process-local store.
    pub fn in_memory(config: &AppConfig) -> Self {
        let store = InMemoryStore::with_area(config.storage_area.clone());
        Self::with_store(Arc::new(store), config)
    }

    /// Wire against an already-open store.
    pub fn with_store(store: Arc<dyn StorePort>, config: &AppConfig) -> Self {
        Self {
            store,
            bus: Arc::new(InProcessMessageBus::new(Duration::from_millis(
                config.send_timeout_ms,
            ))),
            tabs: Arc::new(TabRegistry::new()),
            clock: Arc::new(SystemClock),
            ids: Arc::new(TimestampIdGenerator::new()),
            max_history_items: config.max_history_items,
        }
    }

    /// Build one context's mirrors and start keeping them in sync.
    ///
    /// The change feed is subscribed before the initial load so no write
    /// between the two is missed.
    pub async fn attach_context(&self) -> Result<ContextDeps, StoreError> {
        let changes = self.store.subscribe();

        let snippets = Arc::new(SnippetBook::new(self.store.clone()));
        let history = Arc::new(HistoryEngine::new(
            self.store.clone(),
            snippets.clone(),
            self.ids.clone(),
            self.clock.clone(),
            self.max_history_items,
        ));

        let sync = ChangeSync::new(history.clone(), snippets.clone(), self.store.area());
        let sync_task = sync.spawn(changes);

        let loaded = async {
            snippets.load().await?;
            history.load().await
        }
        .await;

        let deps = ContextDeps {
            history,
            snippets,
            sync_task,
        };
        loaded.map(|()| deps)
    }
}

/// Per-context use cases. Dropping it stops the context's sync task.
pub struct ContextDeps {
    pub history: Arc<HistoryEngine>,
    pub snippets: Arc<SnippetBook>,
    sync_task: JoinHandle<()>,
}

impl Drop for ContextDeps {
    fn drop(&mut self) {
        self.sync_task.abort();
    }
}

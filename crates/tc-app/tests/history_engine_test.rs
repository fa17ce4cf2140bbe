//! Behaviour of the history engine against a real in-memory store.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;
use tc_app::usecases::{BackupHistory, RestoreHistory};
use tc_app::EngineError;
use tc_core::ports::{StorePort, CLIPBOARD_HISTORY_KEY};
use tc_core::ItemId;
use tc_infra::store::InMemoryStore;

use common::{init_tracing, Context};

async fn context() -> (Arc<InMemoryStore>, Context) {
    init_tracing();
    let store = Arc::new(InMemoryStore::new());
    let ctx = Context::attach(store.clone(), 100, 1).await;
    (store, ctx)
}

#[tokio::test]
async fn add_puts_newest_first_and_persists() {
    let (store, ctx) = context().await;

    ctx.history.add("first", "https://a.example").await.unwrap();
    ctx.history.add("second", "").await.unwrap();

    assert_eq!(ctx.texts().await, vec!["second", "first"]);
    let stored = store.raw(CLIPBOARD_HISTORY_KEY).unwrap();
    assert_eq!(stored[0]["text"], "second");
    assert_eq!(stored[1]["url"], "https://a.example");
}

#[tokio::test]
async fn empty_text_is_ignored() {
    let (store, ctx) = context().await;

    assert_eq!(ctx.history.add("", "https://a.example").await.unwrap(), None);

    assert!(ctx.history.is_empty().await);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn history_is_capped_at_one_hundred() {
    let (_store, ctx) = context().await;

    for n in 0..100 {
        ctx.history.add(&format!("item {n}"), "").await.unwrap();
    }
    let oldest = ctx.history.get_all().await.last().unwrap().clone();
    assert_eq!(oldest.text, "item 0");

    ctx.history.add("item 100", "").await.unwrap();

    let items = ctx.history.get_all().await;
    assert_eq!(items.len(), 100);
    assert_eq!(items[0].text, "item 100");
    assert!(items.iter().all(|item| item.id != oldest.id));
}

#[tokio::test]
async fn snippet_key_is_expanded_on_capture() {
    let (_store, ctx) = context().await;
    ctx.snippets.set("brb", "be right back").await.unwrap();

    ctx.history.add("brb", "").await.unwrap();
    ctx.history.add("brb later", "").await.unwrap();

    assert_eq!(ctx.texts().await, vec!["brb later", "be right back"]);
}

#[tokio::test]
async fn expansion_is_single_level() {
    let (_store, ctx) = context().await;
    ctx.snippets.set("a", "b").await.unwrap();
    ctx.snippets.set("b", "c").await.unwrap();

    ctx.history.add("a", "").await.unwrap();

    assert_eq!(ctx.texts().await, vec!["b"]);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (store, ctx) = context().await;
    let id = ctx.history.add("x", "").await.unwrap().unwrap();

    assert!(ctx.history.delete(&id).await.unwrap());
    let writes = store.write_count();
    assert!(!ctx.history.delete(&id).await.unwrap());

    assert!(ctx.history.is_empty().await);
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn toggling_favorite_twice_restores_flag() {
    let (_store, ctx) = context().await;
    let id = ctx.history.add("x", "").await.unwrap().unwrap();

    assert_eq!(ctx.history.toggle_favorite(&id).await.unwrap(), Some(true));
    assert_eq!(ctx.history.toggle_favorite(&id).await.unwrap(), Some(false));
    assert_eq!(
        ctx.history
            .toggle_favorite(&ItemId::from("missing"))
            .await
            .unwrap(),
        None
    );
    assert!(!ctx.history.get_all().await[0].favorite);
}

#[tokio::test]
async fn delete_many_is_a_single_write() {
    let (store, ctx) = context().await;
    let mut ids = HashSet::new();
    for n in 0..5 {
        let id = ctx.history.add(&format!("{n}"), "").await.unwrap().unwrap();
        if n % 2 == 0 {
            ids.insert(id);
        }
    }
    let writes = store.write_count();

    assert_eq!(ctx.history.delete_many(&ids).await.unwrap(), 3);

    assert_eq!(store.write_count(), writes + 1);
    assert_eq!(ctx.texts().await, vec!["3", "1"]);
}

#[tokio::test]
async fn restore_rejects_non_array_and_keeps_history() {
    let (store, ctx) = context().await;
    ctx.history.add("keep me", "").await.unwrap();
    let writes = store.write_count();

    let restore = RestoreHistory::new(ctx.history.clone());
    let err = restore.execute(r#"{"not": "an array"}"#).await.unwrap_err();

    assert!(matches!(err, EngineError::InvalidBackupFormat(_)));
    assert_eq!(ctx.texts().await, vec!["keep me"]);
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn restore_rejects_unparseable_text() {
    let (_store, ctx) = context().await;

    let err = RestoreHistory::new(ctx.history.clone())
        .execute("[{")
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidBackupFormat(_)));
}

#[tokio::test]
async fn restore_rejects_duplicate_ids() {
    let (_store, ctx) = context().await;
    let text = json!([
        {"id": "1", "text": "a", "url": "", "favorite": false, "timestamp": 1},
        {"id": "1", "text": "b", "url": "", "favorite": false, "timestamp": 2}
    ])
    .to_string();

    let err = RestoreHistory::new(ctx.history.clone())
        .execute(&text)
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidBackupFormat(_)));
    assert!(ctx.history.is_empty().await);
}

#[tokio::test]
async fn backup_then_restore_reproduces_history() {
    let (_store, ctx) = context().await;
    ctx.history.add("one", "https://one.example").await.unwrap();
    let fav = ctx.history.add("two", "").await.unwrap().unwrap();
    ctx.history.toggle_favorite(&fav).await.unwrap();
    let before = ctx.history.get_all().await;

    let text = BackupHistory::new(ctx.history.clone()).execute().await.unwrap();
    ctx.history.add("three", "").await.unwrap();
    let restored = RestoreHistory::new(ctx.history.clone())
        .execute(&text)
        .await
        .unwrap();

    assert_eq!(restored, 2);
    assert_eq!(ctx.history.get_all().await, before);
}

#[tokio::test]
async fn restore_fills_missing_optional_fields() {
    let (_store, ctx) = context().await;
    let text = json!([{"id": "legacy", "text": "old", "timestamp": 5}]).to_string();

    RestoreHistory::new(ctx.history.clone())
        .execute(&text)
        .await
        .unwrap();

    let item = &ctx.history.get_all().await[0];
    assert_eq!(item.url, "");
    assert!(!item.favorite);
}

#[tokio::test]
async fn unreadable_stored_history_loads_as_empty() {
    init_tracing();
    let store = Arc::new(InMemoryStore::new());
    store.seed(CLIPBOARD_HISTORY_KEY, json!("garbage"));

    let ctx = Context::attach(store.clone(), 100, 1).await;

    assert!(ctx.history.is_empty().await);
    ctx.history.add("fresh", "").await.unwrap();
    let stored = store.get(&[CLIPBOARD_HISTORY_KEY]).await.unwrap();
    assert_eq!(stored[CLIPBOARD_HISTORY_KEY][0]["text"], "fresh");
}

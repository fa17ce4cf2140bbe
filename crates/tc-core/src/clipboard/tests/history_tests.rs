//! Tests for [`ClipboardHistory`] ordering, bounding and identity.

use std::collections::HashSet;

use super::fixtures::*;
use crate::clipboard::*;

#[test]
fn push_front_keeps_newest_first() {
    let mut history = ClipboardHistory::default();
    history.push_front(item(1, "first"));
    history.push_front(item(2, "second"));

    let texts: Vec<_> = history.items().iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["second", "first"]);
    assert_eq!(history.latest().unwrap().text, "second");
}

#[test]
fn never_exceeds_cap() {
    let history = history_of(250);
    assert_eq!(history.len(), DEFAULT_MAX_HISTORY_ITEMS);
}

#[test]
fn hundred_and_first_push_evicts_exactly_the_oldest() {
    let mut history = history_of(100);
    let oldest = history.items().last().unwrap().id.clone();

    let evicted = history.push_front(item(101, "newest"));

    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].id, oldest);
    assert_eq!(history.len(), 100);
    assert!(!history.contains(&oldest));
    assert_eq!(history.latest().unwrap().text, "newest");
}

#[test]
fn custom_cap_is_respected() {
    let mut history = ClipboardHistory::with_capacity(3);
    for n in 1..=5 {
        history.push_front(item(n, "x"));
    }
    let ids: Vec<_> = history.items().iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids, vec![item(5, "").id, item(4, "").id, item(3, "").id]);
}

#[test]
fn push_front_with_existing_id_keeps_ids_unique() {
    let mut history = history_of(3);
    history.push_front(item(1, "again"));

    assert_eq!(history.len(), 3);
    assert_eq!(history.latest().unwrap().text, "again");
    let unique: HashSet<_> = history.items().iter().map(|i| &i.id).collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn remove_is_keyed_by_id_and_idempotent() {
    let mut history = history_of(3);
    let target = item(2, "").id;

    assert!(history.remove(&target));
    assert!(!history.remove(&target));
    assert_eq!(history.len(), 2);
}

#[test]
fn remove_many_drops_only_listed_ids() {
    let mut history = history_of(3);
    let ids: HashSet<_> = [item(1, "").id, item(3, "").id].into_iter().collect();

    let removed = history.remove_many(&ids);

    assert_eq!(removed, 2);
    assert_eq!(history.len(), 1);
    assert_eq!(history.items()[0].id, item(2, "").id);
}

#[test]
fn toggle_favorite_is_an_involution() {
    let mut history = history_of(2);
    let id = item(1, "").id;

    assert_eq!(history.toggle_favorite(&id), Some(true));
    assert_eq!(history.toggle_favorite(&id), Some(false));
    assert!(!history.get(&id).unwrap().favorite);
}

#[test]
fn toggle_favorite_unknown_id_is_none() {
    let mut history = history_of(2);
    assert_eq!(history.toggle_favorite(&item(99, "").id), None);
}

#[test]
fn from_items_rejects_duplicate_ids() {
    let result = ClipboardHistory::from_items(vec![item(1, "a"), item(1, "b")], 100);
    assert_eq!(result, Err(HistoryError::DuplicateId(item(1, "").id)));
}

#[test]
fn from_items_truncates_tail() {
    let items: Vec<_> = (1..=5).rev().map(|n| item(n, "x")).collect();
    let history = ClipboardHistory::from_items(items, 2).unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history.items()[0].id, item(5, "").id);
    assert_eq!(history.items()[1].id, item(4, "").id);
}

#[test]
fn from_stored_drops_later_duplicates() {
    let history = ClipboardHistory::from_stored(vec![item(1, "keep"), item(1, "drop")], 100);
    assert_eq!(history.len(), 1);
    assert_eq!(history.items()[0].text, "keep");
}

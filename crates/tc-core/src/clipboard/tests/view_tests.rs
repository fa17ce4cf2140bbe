//! Tests for [`HistoryView`] projection and [`HistoryFilter`].

use super::fixtures::*;
use crate::clipboard::*;

fn sample() -> Vec<ClipboardItem> {
    let mut fav = item_with_url(3, "Rust Book", "https://doc.rust-lang.org/book");
    fav.favorite = true;
    vec![
        fav,
        item_with_url(2, "lunch order", "https://food.example"),
        item(1, "plain text"),
    ]
}

#[test]
fn unfiltered_projection_keeps_order() {
    let view = HistoryView::project(&sample(), &HistoryFilter::all());
    let texts: Vec<_> = view.rows.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Rust Book", "lunch order", "plain text"]);
}

#[test]
fn favorites_only_hides_others() {
    let view = HistoryView::project(&sample(), &HistoryFilter::favorites());
    assert_eq!(view.rows.len(), 1);
    assert!(view.rows[0].favorite);
}

#[test]
fn search_is_case_insensitive_over_text() {
    let view = HistoryView::project(&sample(), &HistoryFilter::all().with_search("RUST"));
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].text, "Rust Book");
}

#[test]
fn search_matches_url() {
    let view = HistoryView::project(&sample(), &HistoryFilter::all().with_search("food.EXAMPLE"));
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].text, "lunch order");
}

#[test]
fn search_and_favorites_combine() {
    let filter = HistoryFilter::favorites().with_search("lunch");
    assert!(HistoryView::project(&sample(), &filter).is_empty());
}

#[test]
fn empty_projection_has_placeholder() {
    let view = HistoryView::project(&[], &HistoryFilter::all());
    assert_eq!(view.placeholder(), Some(EMPTY_HISTORY_PLACEHOLDER));
}

#[test]
fn jump_url_only_when_present() {
    let view = HistoryView::project(&sample(), &HistoryFilter::all());
    assert_eq!(view.rows[1].jump_url.as_deref(), Some("https://food.example"));
    assert_eq!(view.rows[2].jump_url, None);
    assert!(view.rows[2].captured_at.is_some());
}

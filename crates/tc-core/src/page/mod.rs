//! Page-side model used by the content context.
//!
//! The DOM itself lives behind [`PagePort`](crate::ports::PagePort); this
//! module only holds the pieces with rules worth testing: which focused
//! elements accept inserted text and how a splice moves the cursor.

use serde::{Deserialize, Serialize};

/// What currently has keyboard focus in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FocusedElement {
    TextArea,
    /// `<input>` with its `type` attribute.
    Input { input_type: String },
    /// Anything else, including nothing focused.
    Other,
}

impl FocusedElement {
    /// Text can be spliced directly into textareas and plain text inputs.
    pub fn accepts_text(&self) -> bool {
        match self {
            FocusedElement::TextArea => true,
            FocusedElement::Input { input_type } => input_type.eq_ignore_ascii_case("text"),
            FocusedElement::Other => false,
        }
    }
}

/// Value and selection of a text-capable element.
///
/// Selection bounds are character offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputState {
    pub value: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

impl TextInputState {
    pub fn new(value: impl Into<String>, selection_start: usize, selection_end: usize) -> Self {
        Self {
            value: value.into(),
            selection_start,
            selection_end,
        }
    }

    /// Cursor collapsed at the end of `value`.
    pub fn at_end(value: impl Into<String>) -> Self {
        let value = value.into();
        let end = value.chars().count();
        Self::new(value, end, end)
    }

    /// Replace the selection with `text` and collapse the cursor right after it.
    ///
    /// Out-of-range or inverted bounds are clamped into the value first.
    pub fn splice(&self, text: &str) -> Self {
        let len = self.value.chars().count();
        let start = self.selection_start.min(len);
        let end = self.selection_end.min(len).max(start);

        let mut value: String = self.value.chars().take(start).collect();
        value.push_str(text);
        value.extend(self.value.chars().skip(end));

        let cursor = start + text.chars().count();
        Self::new(value, cursor, cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_textarea_and_text_input_accept_text() {
        assert!(FocusedElement::TextArea.accepts_text());
        assert!(FocusedElement::Input { input_type: "text".into() }.accepts_text());
        assert!(!FocusedElement::Input { input_type: "password".into() }.accepts_text());
        assert!(!FocusedElement::Other.accepts_text());
    }

    #[test]
    fn splice_inserts_at_collapsed_cursor() {
        let state = TextInputState::new("hello world", 5, 5);
        let next = state.splice(",");
        assert_eq!(next.value, "hello, world");
        assert_eq!((next.selection_start, next.selection_end), (6, 6));
    }

    #[test]
    fn splice_replaces_selection() {
        let state = TextInputState::new("hello world", 6, 11);
        let next = state.splice("there");
        assert_eq!(next.value, "hello there");
        assert_eq!(next.selection_start, 11);
    }

    #[test]
    fn splice_counts_characters_not_bytes() {
        let state = TextInputState::new("héllo", 2, 2);
        let next = state.splice("ü");
        assert_eq!(next.value, "héüllo");
        assert_eq!(next.selection_start, 3);
    }

    #[test]
    fn splice_clamps_bad_bounds() {
        let state = TextInputState::new("abc", 10, 2);
        let next = state.splice("!");
        assert_eq!(next.value, "abc!");
        assert_eq!(next.selection_end, 4);
    }

    #[test]
    fn at_end_places_cursor_after_value() {
        let state = TextInputState::at_end("abc");
        assert_eq!(state.splice("d").value, "abcd");
    }
}

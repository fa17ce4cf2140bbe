use async_trait::async_trait;

use crate::page::{FocusedElement, TextInputState};

/// The document a content context is attached to.
#[async_trait]
pub trait PagePort: Send + Sync {
    /// Currently selected text, empty when nothing is selected.
    fn selection_text(&self) -> String;

    /// Page URL, may be empty.
    fn location(&self) -> String;

    fn focused_element(&self) -> FocusedElement;

    /// Value and selection of the focused element, when it has them.
    fn read_text_input(&self) -> Option<TextInputState>;

    /// Write value and selection back and fire the element's input event.
    fn commit_text_input(&self, state: TextInputState);

    /// Ask the page to perform a paste at the current focus.
    async fn exec_paste(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait SystemClipboardPort: Send + Sync {
    async fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

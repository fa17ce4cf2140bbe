use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use tc_core::page::{FocusedElement, TextInputState};
use tc_core::ports::{PagePort, SystemClipboardPort};

#[derive(Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.text.lock().ok()?.clone()
    }
}

#[async_trait]
impl SystemClipboardPort for MemoryClipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut slot = self
            .text
            .lock()
            .map_err(|e| anyhow::anyhow!("clipboard lock poisoned: {e}"))?;
        *slot = Some(text.to_string());
        Ok(())
    }
}

struct PageState {
    selection: String,
    focused: FocusedElement,
    input: Option<TextInputState>,
    pasted: Vec<String>,
}

/// A document with one focusable element.
///
/// A paste into a non-text element lands in [`pasted`](Self::pasted), the way
/// a rich editor would swallow it.
pub struct SimulatedPage {
    location: String,
    clipboard: Arc<MemoryClipboard>,
    state: Mutex<PageState>,
}

impl SimulatedPage {
    pub fn new(location: impl Into<String>, clipboard: Arc<MemoryClipboard>) -> Self {
        Self {
            location: location.into(),
            clipboard,
            state: Mutex::new(PageState {
                selection: String::new(),
                focused: FocusedElement::Other,
                input: None,
                pasted: Vec::new(),
            }),
        }
    }

    pub fn select(&self, text: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.selection = text.into();
        }
    }

    /// Focus a text-capable element holding `input`.
    pub fn focus_input(&self, element: FocusedElement, input: TextInputState) {
        if let Ok(mut state) = self.state.lock() {
            state.focused = element;
            state.input = Some(input);
        }
    }

    pub fn blur(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.focused = FocusedElement::Other;
            state.input = None;
        }
    }

    pub fn input(&self) -> Option<TextInputState> {
        self.state.lock().ok()?.input.clone()
    }

    pub fn pasted(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.pasted.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PagePort for SimulatedPage {
    fn selection_text(&self) -> String {
        self.state
            .lock()
            .map(|state| state.selection.clone())
            .unwrap_or_default()
    }

    fn location(&self) -> String {
        self.location.clone()
    }

    fn focused_element(&self) -> FocusedElement {
        self.state
            .lock()
            .map(|state| state.focused.clone())
            .unwrap_or(FocusedElement::Other)
    }

    fn read_text_input(&self) -> Option<TextInputState> {
        self.input()
    }

    fn commit_text_input(&self, input: TextInputState) {
        if let Ok(mut state) = self.state.lock() {
            debug!(len = input.value.len(), "input event");
            state.input = Some(input);
        }
    }

    async fn exec_paste(&self) -> anyhow::Result<()> {
        let text = self
            .clipboard
            .contents()
            .ok_or_else(|| anyhow::anyhow!("clipboard is empty"))?;
        let mut state = self
            .state
            .lock()
            .map_err(|e| anyhow::anyhow!("page lock poisoned: {e}"))?;
        state.pasted.push(text);
        Ok(())
    }
}

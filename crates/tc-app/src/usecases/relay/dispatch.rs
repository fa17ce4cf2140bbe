//! Message dispatch keyed by the `type` tag.
//!
//! Handlers are pure: they turn a decoded message into an [`Effect`] and the
//! owning context decides how to carry it out.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use tc_core::relay::{CLIPBOARD_COPY, PASTE_TEXT};
use tc_core::RelayMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AddToHistory { text: String, url: String },
    InsertText { text: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("message has no `type` field")]
    MissingType,

    #[error("malformed `{kind}` message: {reason}")]
    Decode { kind: String, reason: String },
}

pub type Handler = fn(RelayMessage) -> Option<Effect>;

#[derive(Clone, Default)]
pub struct DispatchTable {
    handlers: HashMap<&'static str, Handler>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, kind: &'static str, handler: Handler) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    /// Messages the background context reacts to.
    pub fn background() -> Self {
        Self::new().register(CLIPBOARD_COPY, on_clipboard_copy)
    }

    /// Messages a page's content context reacts to.
    pub fn content() -> Self {
        Self::new().register(PASTE_TEXT, on_paste_text)
    }

    pub fn handles(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Route `message` to its handler.
    ///
    /// Types with no registered handler are not an error: another context
    /// may be the intended listener.
    pub fn dispatch(&self, message: &Value) -> Result<Option<Effect>, DispatchError> {
        let kind = message
            .get("type")
            .and_then(Value::as_str)
            .ok_or(DispatchError::MissingType)?;

        let Some(handler) = self.handlers.get(kind) else {
            debug!(kind, "no handler for message type");
            return Ok(None);
        };

        let decoded: RelayMessage =
            serde_json::from_value(message.clone()).map_err(|e| DispatchError::Decode {
                kind: kind.to_string(),
                reason: e.to_string(),
            })?;

        Ok(handler(decoded))
    }
}

fn on_clipboard_copy(message: RelayMessage) -> Option<Effect> {
    match message {
        RelayMessage::ClipboardCopy { text, url } if !text.is_empty() => {
            Some(Effect::AddToHistory { text, url })
        }
        _ => None,
    }
}

fn on_paste_text(message: RelayMessage) -> Option<Effect> {
    match message {
        RelayMessage::PasteText { text } if !text.is_empty() => Some(Effect::InsertText { text }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn background_turns_copy_into_add() {
        let effect = DispatchTable::background()
            .dispatch(&json!({"type": "clipboard-copy", "text": "hi", "url": "https://a.b"}))
            .unwrap();
        assert_eq!(
            effect,
            Some(Effect::AddToHistory {
                text: "hi".into(),
                url: "https://a.b".into()
            })
        );
    }

    #[test]
    fn empty_or_null_text_yields_nothing() {
        let table = DispatchTable::background();
        assert_eq!(table.dispatch(&json!({"type": "clipboard-copy", "text": ""})).unwrap(), None);
        assert_eq!(table.dispatch(&json!({"type": "clipboard-copy", "text": null})).unwrap(), None);
        assert_eq!(table.dispatch(&json!({"type": "clipboard-copy"})).unwrap(), None);
    }

    #[test]
    fn background_ignores_paste_text() {
        let effect = DispatchTable::background()
            .dispatch(&json!({"type": "paste-text", "text": "x"}))
            .unwrap();
        assert_eq!(effect, None);
    }

    #[test]
    fn content_turns_paste_into_insert() {
        let effect = DispatchTable::content()
            .dispatch(&json!({"type": "paste-text", "text": "x"}))
            .unwrap();
        assert_eq!(effect, Some(Effect::InsertText { text: "x".into() }));
    }

    #[test]
    fn untagged_message_is_an_error() {
        let err = DispatchTable::content().dispatch(&json!({"text": "x"})).unwrap_err();
        assert_eq!(err, DispatchError::MissingType);
    }

    #[test]
    fn wrong_field_types_are_decode_errors() {
        let err = DispatchTable::content()
            .dispatch(&json!({"type": "paste-text", "text": 5}))
            .unwrap_err();
        assert!(matches!(err, DispatchError::Decode { .. }));
    }
}

use serde::{Deserialize, Deserializer, Serialize};

pub const CLIPBOARD_COPY: &str = "clipboard-copy";
pub const PASTE_TEXT: &str = "paste-text";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelayMessage {
    /// Page context -> background: a copy happened.
    #[serde(rename = "clipboard-copy")]
    ClipboardCopy {
        #[serde(default, deserialize_with = "null_as_empty")]
        text: String,
        #[serde(default, deserialize_with = "null_as_empty")]
        url: String,
    },

    /// Background -> page context: insert this text at the cursor.
    #[serde(rename = "paste-text")]
    PasteText {
        #[serde(default, deserialize_with = "null_as_empty")]
        text: String,
    },
}

/// Senders may pass `null` where a string is expected; treat it as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl RelayMessage {
    pub fn clipboard_copy(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ClipboardCopy {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn paste_text(text: impl Into<String>) -> Self {
        Self::PasteText { text: text.into() }
    }

    /// Value of the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClipboardCopy { .. } => CLIPBOARD_COPY,
            Self::PasteText { .. } => PASTE_TEXT,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::ClipboardCopy { text, .. } | Self::PasteText { text } => text,
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        // Both variants are plain string fields; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clipboard_copy_wire_shape() {
        let msg = RelayMessage::clipboard_copy("hello", "https://example.com");
        assert_eq!(
            msg.to_value(),
            json!({"type": "clipboard-copy", "text": "hello", "url": "https://example.com"})
        );
    }

    #[test]
    fn paste_text_wire_shape() {
        let msg = RelayMessage::paste_text("hi");
        assert_eq!(msg.to_value(), json!({"type": "paste-text", "text": "hi"}));
        assert_eq!(msg.kind(), PASTE_TEXT);
    }

    #[test]
    fn missing_url_defaults_to_empty() {
        let msg: RelayMessage =
            serde_json::from_value(json!({"type": "clipboard-copy", "text": "x"})).unwrap();
        assert_eq!(msg, RelayMessage::clipboard_copy("x", ""));
    }

    #[test]
    fn null_text_decodes_as_empty() {
        let msg: RelayMessage =
            serde_json::from_value(json!({"type": "paste-text", "text": null})).unwrap();
        assert_eq!(msg.text(), "");
    }

    #[test]
    fn unknown_type_does_not_decode() {
        let res = serde_json::from_value::<RelayMessage>(json!({"type": "bogus"}));
        assert!(res.is_err());
    }
}

//! Cross-context relay protocol.
//!
//! Messages travel as JSON objects tagged by a `type` field so every context
//! can route them before knowing the full payload shape.

mod command;
mod endpoint;
mod message;

pub use command::HostCommand;
pub use endpoint::Endpoint;
pub use message::{RelayMessage, CLIPBOARD_COPY, PASTE_TEXT};

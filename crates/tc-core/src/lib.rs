//! # tc-core
//!
//! Core domain models and ports for the tabclip clipboard history.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod app_dirs;
pub mod clipboard;
pub mod config;
pub mod ids;
pub mod page;
pub mod ports;
pub mod relay;
pub mod snippet;

pub use clipboard::{ClipboardHistory, ClipboardItem, HistoryError, DEFAULT_MAX_HISTORY_ITEMS};
pub use config::AppConfig;
pub use ids::{ItemId, TabId};
pub use relay::{Endpoint, HostCommand, RelayMessage};
pub use snippet::{SnippetError, SnippetTable};

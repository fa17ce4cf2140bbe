//! tabclip application layer
//!
//! Use cases that every execution context composes: the history engine and
//! snippet book (each owning this context's in-memory mirror of one store
//! record), change-notification sync, backup/restore, and the capture and
//! playback halves of the relay.

pub mod errors;
pub mod mirror;
pub mod usecases;

pub use errors::EngineError;
pub use usecases::history::HistoryEngine;
pub use usecases::snippets::SnippetBook;

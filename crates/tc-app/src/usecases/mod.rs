//! Use cases
//!
//! copy event (content) --CaptureRelay--> bus --DispatchTable--> HistoryEngine::add
//!                                                                   |
//!                                                          store write + notify
//!                                                                   |
//!                      every context: ChangeSync -> HistoryEngine / SnippetBook mirrors
//!
//! paste-last-item (host) --PasteLastItem--> bus --DispatchTable--> InsertText (content)

pub mod backup;
pub mod history;
pub mod relay;
pub mod snippets;
pub mod sync;

pub use backup::{BackupHistory, RestoreHistory};
pub use history::HistoryEngine;
pub use relay::{CaptureRelay, DispatchTable, Effect, InsertText, PasteLastItem};
pub use snippets::SnippetBook;
pub use sync::ChangeSync;

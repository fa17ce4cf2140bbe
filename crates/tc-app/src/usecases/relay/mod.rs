//! Capture and playback halves of the cross-context relay.

mod capture;
mod dispatch;
mod playback;

pub use capture::{CaptureOutcome, CaptureRelay};
pub use dispatch::{DispatchError, DispatchTable, Effect, Handler};
pub use playback::{InsertOutcome, InsertText, PasteLastItem, PlaybackOutcome};

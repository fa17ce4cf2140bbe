//! The three execution contexts.
//!
//! Each owns its own mirrors of the stored records and talks to the others
//! only through the store and the message bus.

pub mod background;
pub mod content;
pub mod popup;

pub use background::{BackgroundCommand, BackgroundContext, BackgroundHandle};
pub use content::{ContentCommand, ContentContext, ContentHandle};
pub use popup::{Notice, PopupSession, PopupView};

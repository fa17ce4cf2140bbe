//! In-process stand-ins for the host's messaging and tab APIs.

mod bus;
mod tabs;

pub use bus::InProcessMessageBus;
pub use tabs::TabRegistry;

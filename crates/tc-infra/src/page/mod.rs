//! Headless page and clipboard used by the CLI host and tests.

mod simulated;

pub use simulated::{MemoryClipboard, SimulatedPage};

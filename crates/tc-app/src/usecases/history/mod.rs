mod engine;
mod record;

pub use engine::HistoryEngine;

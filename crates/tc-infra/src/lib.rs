pub mod fs;
pub mod ids;
pub mod page;
pub mod relay;
pub mod store;
pub mod time;

pub use fs::DirsAppDirsAdapter;
pub use ids::TimestampIdGenerator;
pub use time::SystemClock;

//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `tc-app` and the
//! adapters in `tc-infra`. Everything a context shares with another context
//! goes through one of these: the persistent store or the message bus.

pub mod app_dirs;
mod clock;
pub mod errors;
mod id_generator;
pub mod page;
pub mod relay;
pub mod store;

pub use app_dirs::AppDirsPort;
pub use clock::ClockPort;
pub use errors::{AppDirsError, DeliveryError, StoreError};
pub use id_generator::IdGeneratorPort;
pub use page::{PagePort, SystemClipboardPort};
pub use relay::{MessageBusPort, TabsPort};
pub use store::{StoreChange, StorePort, ValueChange, CLIPBOARD_HISTORY_KEY, SNIPPETS_KEY};

//! ID type wrappers for type safety.

mod id_macro;
pub mod item_id;
pub mod tab_id;

pub use item_id::ItemId;
pub use tab_id::TabId;

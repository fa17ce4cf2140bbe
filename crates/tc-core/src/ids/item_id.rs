use serde::{Deserialize, Serialize};

use super::id_macro::impl_string_id;

/// Identity of a single history item.
///
/// Assigned once when the item is captured and never reused. The textual form
/// is `<millis>-<sequence>-<random>`, but callers must treat it as opaque:
/// restored backups may carry ids produced by older builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl_string_id!(ItemId);

impl ItemId {
    /// Compose an id from its three parts.
    pub fn compose(millis: i64, sequence: u32, suffix: u32) -> Self {
        Self(format!("{millis}-{sequence:04}-{suffix:06}"))
    }
}

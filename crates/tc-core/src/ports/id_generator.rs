use crate::ids::ItemId;

/// Source of fresh item ids.
///
/// Two calls on the same generator never return the same id, even within one
/// millisecond. Generators in different contexts need no coordination.
pub trait IdGeneratorPort: Send + Sync {
    fn next_id(&self, now_ms: i64) -> ItemId;
}

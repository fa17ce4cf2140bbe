use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use tc_core::ports::IdGeneratorPort;
use tc_core::ItemId;

const SEQUENCE_MODULUS: u32 = 10_000;
const SUFFIX_MODULUS: u32 = 1_000_000;

/// Ids of the form `<millis>-<sequence>-<random>`.
///
/// The per-process sequence keeps ids distinct when several captures land in
/// the same millisecond; the random suffix separates processes.
pub struct TimestampIdGenerator {
    sequence: AtomicU32,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU32::new(0),
        }
    }
}

impl Default for TimestampIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGeneratorPort for TimestampIdGenerator {
    fn next_id(&self, now_ms: i64) -> ItemId {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) % SEQUENCE_MODULUS;
        let suffix = rand::rng().random_range(0..SUFFIX_MODULUS);
        ItemId::compose(now_ms, sequence, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_in_same_millisecond_are_distinct() {
        let ids = TimestampIdGenerator::new();
        let generated: HashSet<_> = (0..1_000).map(|_| ids.next_id(42)).collect();
        assert_eq!(generated.len(), 1_000);
    }

    #[test]
    fn id_starts_with_timestamp() {
        let id = TimestampIdGenerator::new().next_id(1_700_000_000_000);
        assert!(id.as_str().starts_with("1700000000000-0000-"));
    }
}

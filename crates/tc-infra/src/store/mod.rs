//! Store adapters.
//!
//! Both adapters replace whole records on `set` and publish one
//! [`StoreChange`] per successful write, in write order, even when a record
//! was rewritten with an identical value.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use std::collections::HashMap;

use serde_json::Value;
use tc_core::ports::{StoreChange, ValueChange};

/// Capacity of the change feed. Slower subscribers see `Lagged` and resync.
pub const CHANGE_FEED_CAPACITY: usize = 256;

/// Apply `items` to `records` and describe what changed.
fn apply_items(
    records: &mut HashMap<String, Value>,
    area: &str,
    items: HashMap<String, Value>,
) -> StoreChange {
    let changes = items
        .into_iter()
        .map(|(key, new_value)| {
            let old_value = records.insert(key.clone(), new_value.clone());
            (
                key,
                ValueChange {
                    old_value,
                    new_value: Some(new_value),
                },
            )
        })
        .collect();

    StoreChange {
        area: area.to_string(),
        changes,
    }
}

fn pick(records: &HashMap<String, Value>, keys: &[&str]) -> HashMap<String, Value> {
    keys.iter()
        .filter_map(|key| records.get(*key).map(|v| ((*key).to_string(), v.clone())))
        .collect()
}

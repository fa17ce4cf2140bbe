//! # Configuration DTO
//!
//! Plain data mapped from TOML. Loading lives in the host; this module only
//! knows the shape of the file and how present keys overlay a base value.

use std::path::PathBuf;

use crate::clipboard::DEFAULT_MAX_HISTORY_ITEMS;

pub const DEFAULT_STORAGE_AREA: &str = "local";
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// History cap, oldest entries are evicted past it.
    pub max_history_items: usize,

    /// JSON file backing the persistent store.
    pub store_path: PathBuf,

    /// Storage area name reported in change notifications.
    pub storage_area: String,

    /// Upper bound for a single relay message delivery.
    pub send_timeout_ms: u64,

    pub logs_dir: PathBuf,
}

impl AppConfig {
    /// Defaults rooted at the platform data directory.
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            max_history_items: DEFAULT_MAX_HISTORY_ITEMS,
            store_path: data_dir.join("storage.json"),
            storage_area: DEFAULT_STORAGE_AREA.to_string(),
            send_timeout_ms: DEFAULT_SEND_TIMEOUT_MS,
            logs_dir: data_dir.join("logs"),
        }
    }

    /// Overlay keys present in `toml_value` onto `base`.
    ///
    /// Absent keys keep the base value. Present keys are taken as-is.
    pub fn from_toml(toml_value: &toml::Value, base: AppConfig) -> anyhow::Result<Self> {
        let section = |name: &str, key: &str| toml_value.get(name).and_then(|s| s.get(key));

        Ok(Self {
            max_history_items: section("history", "max_items")
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as usize)
                .unwrap_or(base.max_history_items),
            store_path: section("storage", "path")
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or(base.store_path),
            storage_area: section("storage", "area")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or(base.storage_area),
            send_timeout_ms: section("relay", "send_timeout_ms")
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(base.send_timeout_ms),
            logs_dir: section("logging", "dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or(base.logs_dir),
        })
    }
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

use tc_core::ports::{StoreChange, StoreError, StorePort};

use super::{apply_items, pick, CHANGE_FEED_CAPACITY};

/// Store backed by one JSON object on disk, one top-level key per record.
///
/// The file is read once on open; afterwards this process's view is
/// authoritative and every `set` rewrites the whole file.
pub struct JsonFileStore {
    path: PathBuf,
    area: String,
    records: Mutex<HashMap<String, Value>>,
    changes: broadcast::Sender<StoreChange>,
}

impl JsonFileStore {
    /// Open `path`, treating a missing file as an empty store.
    pub async fn open(path: impl Into<PathBuf>, area: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = read_records(&path).await?;
        debug!(path = %path.display(), records = records.len(), "opened json store");

        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Ok(Self {
            path,
            area: area.into(),
            records: Mutex::new(records),
            changes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `content` beside the target and rename it into place.
    async fn atomic_write(&self, content: &str) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(|e| {
                StoreError::Write(format!("create store dir failed: {}: {e}", dir.display()))
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await.map_err(|e| {
            StoreError::Write(format!("write temp store failed: {}: {e}", tmp_path.display()))
        })?;

        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            StoreError::Write(format!(
                "rename temp store failed: {} -> {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })
    }
}

async fn read_records(path: &Path) -> Result<HashMap<String, Value>, StoreError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => {
            return Err(StoreError::Read(format!(
                "read store failed: {}: {e}",
                path.display()
            )))
        }
    };

    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
        Ok(_) => {
            warn!(path = %path.display(), "store file is not a JSON object, starting empty");
            Ok(HashMap::new())
        }
        Err(e) => Err(StoreError::Read(format!(
            "parse store failed: {}: {e}",
            path.display()
        ))),
    }
}

#[async_trait]
impl StorePort for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, StoreError> {
        let records = self.records.lock().await;
        Ok(pick(&records, keys))
    }

    async fn set(&self, items: HashMap<String, Value>) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;

        let mut next = records.clone();
        let change = apply_items(&mut next, &self.area, items);

        let object: serde_json::Map<String, Value> =
            next.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        let content = serde_json::to_string_pretty(&Value::Object(object)).map_err(|e| {
            StoreError::Serialization {
                key: "*".to_string(),
                reason: e.to_string(),
            }
        })?;
        self.atomic_write(&content).await?;

        *records = next;
        let _ = self.changes.send(change);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    fn area(&self) -> &str {
        &self.area
    }
}

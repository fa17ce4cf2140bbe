use thiserror::Error;

use tc_core::clipboard::BackupError;
use tc_core::ports::StoreError;
use tc_core::SnippetError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid backup format: {0}")]
    InvalidBackupFormat(#[from] BackupError),

    #[error(transparent)]
    Snippet(#[from] SnippetError),
}

impl EngineError {
    /// Whether the failure came from the persistent store.
    pub fn is_store_error(&self) -> bool {
        matches!(self, EngineError::Store(_))
    }
}

//! Popup session: the on-demand UI over the history and snippet records.
//!
//! State here is view state only (filter, selection, notices). Records live
//! in the context's mirrors, which keep following change notifications while
//! the session is open.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, warn};

use tc_app::usecases::{BackupHistory, RestoreHistory};
use tc_app::{EngineError, HistoryEngine};
use tc_core::clipboard::{BackupError, HistoryFilter, HistoryView};
use tc_core::ports::SystemClipboardPort;
use tc_core::ItemId;

use crate::bootstrap::{ContextDeps, SharedServices};

pub const SNIPPET_FIELDS_REQUIRED: &str = "Please enter both snippet shortcut and text.";
pub const HISTORY_RESTORED: &str = "Clipboard history restored.";
pub const INVALID_BACKUP_FORMAT: &str = "Invalid backup data format.";
pub const HISTORY_LOAD_FAILED: &str = "Failed to load clipboard history.";
pub const HISTORY_BACKED_UP: &str = "Clipboard history backed up.";
pub const COPIED_TO_CLIPBOARD: &str = "Copied to clipboard!";

/// User-facing message raised by a popup action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// What the popup shows after a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub history: HistoryView,
    /// Replaces the list when set: load failure or nothing to show.
    pub placeholder: Option<&'static str>,
    pub favorites_only: bool,
}

pub struct PopupSession {
    deps: Option<ContextDeps>,
    clipboard: Arc<dyn SystemClipboardPort>,
    filter: HistoryFilter,
    view: HistoryView,
    selected: HashSet<ItemId>,
    all_selected: bool,
    notices: Vec<Notice>,
}

impl PopupSession {
    /// Open the popup: load both records and render once.
    ///
    /// A store failure does not fail the open; the session shows the load
    /// failure placeholder and every action reports it as a notice.
    pub async fn open(services: &SharedServices, clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        let deps = match services.attach_context().await {
            Ok(deps) => Some(deps),
            Err(err) => {
                error!(error = %err, "popup failed to load records");
                None
            }
        };

        let mut session = Self {
            deps,
            clipboard,
            filter: HistoryFilter::all(),
            view: HistoryView { rows: Vec::new() },
            selected: HashSet::new(),
            all_selected: false,
            notices: Vec::new(),
        };
        session.render().await;
        session
    }

    /// Re-project the history through the current filter.
    ///
    /// Selection does not survive a render.
    pub async fn render(&mut self) -> PopupView {
        self.selected.clear();
        self.all_selected = false;

        let Some(deps) = &self.deps else {
            self.view = HistoryView { rows: Vec::new() };
            return PopupView {
                history: self.view.clone(),
                placeholder: Some(HISTORY_LOAD_FAILED),
                favorites_only: self.filter.favorites_only,
            };
        };

        let items = deps.history.get_all().await;
        self.view = HistoryView::project(&items, &self.filter);
        PopupView {
            history: self.view.clone(),
            placeholder: self.view.placeholder(),
            favorites_only: self.filter.favorites_only,
        }
    }

    pub async fn show_all(&mut self) -> PopupView {
        self.filter.favorites_only = false;
        self.render().await
    }

    pub async fn show_favorites(&mut self) -> PopupView {
        self.filter.favorites_only = true;
        self.render().await
    }

    pub async fn search(&mut self, term: &str) -> PopupView {
        self.filter.search = term.to_string();
        self.render().await
    }

    /// Check or uncheck one visible row.
    pub fn set_selected(&mut self, id: &ItemId, checked: bool) {
        if !self.view.ids().any(|visible| visible == id) {
            return;
        }
        if checked {
            self.selected.insert(id.clone());
        } else {
            self.selected.remove(id);
        }
        self.all_selected = !self.view.is_empty() && self.selected.len() == self.view.rows.len();
    }

    /// Select every visible row, or clear the selection when all already are.
    pub fn toggle_select_all(&mut self) -> bool {
        if self.all_selected {
            self.selected.clear();
            self.all_selected = false;
        } else {
            self.selected = self.view.ids().cloned().collect();
            self.all_selected = !self.selected.is_empty();
        }
        self.all_selected
    }

    pub fn selected(&self) -> &HashSet<ItemId> {
        &self.selected
    }

    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    /// Delete every selected item in one write.
    ///
    /// A failed write leaves the rows and the selection as they were.
    pub async fn delete_selected(&mut self) -> Result<usize, EngineError> {
        if self.selected.is_empty() {
            return Ok(0);
        }
        let Some(history) = self.history() else {
            return Ok(0);
        };
        match history.delete_many(&self.selected).await {
            Ok(removed) => {
                self.render().await;
                Ok(removed)
            }
            Err(err) => {
                error!(error = %err, "failed to delete selected items");
                self.notify(Notice::Error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn delete(&mut self, id: &ItemId) -> Result<bool, EngineError> {
        let Some(history) = self.history() else {
            return Ok(false);
        };
        match history.delete(id).await {
            Ok(removed) => {
                self.render().await;
                Ok(removed)
            }
            Err(err) => {
                error!(error = %err, item_id = %id, "failed to delete item");
                self.notify(Notice::Error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn toggle_favorite(&mut self, id: &ItemId) -> Result<Option<bool>, EngineError> {
        let Some(history) = self.history() else {
            return Ok(None);
        };
        match history.toggle_favorite(id).await {
            Ok(favorite) => {
                self.render().await;
                Ok(favorite)
            }
            Err(err) => {
                error!(error = %err, item_id = %id, "failed to toggle favorite");
                self.notify(Notice::Error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Put an item's text on the system clipboard.
    pub async fn copy_item(&mut self, id: &ItemId) -> bool {
        let Some(text) = self
            .view
            .rows
            .iter()
            .find(|row| &row.id == id)
            .map(|row| row.text.clone())
        else {
            return false;
        };

        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                self.notify(Notice::Info(COPIED_TO_CLIPBOARD.to_string()));
                true
            }
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                self.notify(Notice::Error(format!("Failed to copy: {err}")));
                false
            }
        }
    }

    /// Save a snippet from the two form fields.
    pub async fn save_snippet(&mut self, key: &str, value: &str) -> bool {
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            self.notify(Notice::Error(SNIPPET_FIELDS_REQUIRED.to_string()));
            return false;
        }
        let Some(snippets) = self.deps.as_ref().map(|deps| deps.snippets.clone()) else {
            self.notify(Notice::Error(HISTORY_LOAD_FAILED.to_string()));
            return false;
        };

        match snippets.set(key, value).await {
            Ok(()) => {
                self.notify(Notice::Info(format!("Snippet {key} saved.")));
                true
            }
            Err(err) => {
                error!(error = %err, "failed to save snippet");
                self.notify(Notice::Error(err.to_string()));
                false
            }
        }
    }

    /// Pretty-printed backup of the whole history, not just the visible rows.
    pub async fn backup(&mut self) -> Option<String> {
        let history = self.history()?;
        match BackupHistory::new(history).execute().await {
            Ok(text) => {
                self.notify(Notice::Info(HISTORY_BACKED_UP.to_string()));
                Some(text)
            }
            Err(err) => {
                error!(error = %err, "backup failed");
                self.notify(Notice::Error(err.to_string()));
                None
            }
        }
    }

    pub async fn restore(&mut self, text: &str) -> bool {
        let Some(history) = self.history() else {
            return false;
        };

        let result = RestoreHistory::new(history).execute(text).await;
        let notice = match result {
            Ok(_) => Notice::Info(HISTORY_RESTORED.to_string()),
            Err(EngineError::InvalidBackupFormat(BackupError::Malformed(reason))) => {
                Notice::Error(format!("Failed to parse JSON: {reason}"))
            }
            Err(EngineError::InvalidBackupFormat(_)) => {
                Notice::Error(INVALID_BACKUP_FORMAT.to_string())
            }
            Err(err) => {
                error!(error = %err, "failed to restore history");
                Notice::Error(err.to_string())
            }
        };

        let restored = !notice.is_error();
        self.notify(notice);
        if restored {
            self.render().await;
        }
        restored
    }

    /// Notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// The history engine, or a load-failure notice when the records never loaded.
    fn history(&mut self) -> Option<Arc<HistoryEngine>> {
        let history = self.deps.as_ref().map(|deps| deps.history.clone());
        if history.is_none() {
            self.notify(Notice::Error(HISTORY_LOAD_FAILED.to_string()));
        }
        history
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

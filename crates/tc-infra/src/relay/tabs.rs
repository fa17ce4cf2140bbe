use std::sync::Mutex;

use async_trait::async_trait;

use tc_core::ports::{DeliveryError, TabsPort};
use tc_core::TabId;

#[derive(Default)]
struct TabState {
    open: Vec<TabId>,
    active: Option<TabId>,
    next_id: u64,
}

/// Open tabs of a single window and which one is active.
#[derive(Default)]
pub struct TabRegistry {
    state: Mutex<TabState>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new tab and make it active.
    pub fn open(&self) -> Result<TabId, DeliveryError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let tab = TabId(state.next_id);
        state.open.push(tab);
        state.active = Some(tab);
        Ok(tab)
    }

    /// Returns false for tabs that are not open.
    pub fn activate(&self, tab: TabId) -> Result<bool, DeliveryError> {
        let mut state = self.lock()?;
        if !state.open.contains(&tab) {
            return Ok(false);
        }
        state.active = Some(tab);
        Ok(true)
    }

    /// Close `tab`. Closing the active tab activates the most recently opened
    /// remaining one.
    pub fn close(&self, tab: TabId) -> Result<(), DeliveryError> {
        let mut state = self.lock()?;
        state.open.retain(|open| *open != tab);
        if state.active == Some(tab) {
            state.active = state.open.last().copied();
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, TabState>, DeliveryError> {
        self.state
            .lock()
            .map_err(|e| DeliveryError::TabQuery(e.to_string()))
    }
}

#[async_trait]
impl TabsPort for TabRegistry {
    async fn active_tab(&self) -> Result<Option<TabId>, DeliveryError> {
        Ok(self.lock()?.active)
    }
}

use serde::{Deserialize, Serialize};

/// Browser tab handle, as assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab:{}", self.0)
    }
}

impl From<u64> for TabId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

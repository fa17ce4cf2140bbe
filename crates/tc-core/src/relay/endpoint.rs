use serde::{Deserialize, Serialize};

use crate::ids::TabId;

/// An addressable execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// The long-lived context that owns the history write path.
    Background,
    /// The content context injected into one tab.
    Tab(TabId),
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Background => write!(f, "background"),
            Endpoint::Tab(tab) => write!(f, "{tab}"),
        }
    }
}

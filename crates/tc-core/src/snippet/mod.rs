//! Snippet table: short trigger keys expanded to longer text at capture time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnippetError {
    #[error("snippet key must not be empty")]
    EmptyKey,

    #[error("snippet text must not be empty")]
    EmptyValue,
}

/// Trigger key to expansion text. Keys are unique, last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetTable(HashMap<String, String>);

impl SnippetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert after trimming both sides.
    ///
    /// Blank keys or values never make it into the table.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SnippetError> {
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(SnippetError::EmptyKey);
        }
        if value.is_empty() {
            return Err(SnippetError::EmptyValue);
        }
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Single-level expansion: an exact key match yields its text, anything
    /// else comes back unchanged. The result is never looked up again.
    pub fn expand<'a>(&'a self, text: &'a str) -> &'a str {
        match self.0.get(text) {
            Some(expansion) if !expansion.is_empty() => expansion,
            _ => text,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for SnippetTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|(k, _)| !k.trim().is_empty()).collect())
    }
}

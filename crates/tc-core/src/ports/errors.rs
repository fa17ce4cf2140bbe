use thiserror::Error;

use crate::relay::Endpoint;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store write failed: {0}")]
    Write(String),

    #[error("stored value for `{key}` has unexpected shape: {reason}")]
    Serialization { key: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("no receiver registered for {0}")]
    NoReceiver(Endpoint),

    #[error("receiver for {0} is gone")]
    Closed(Endpoint),

    #[error("delivery to {0} timed out")]
    Timeout(Endpoint),

    #[error("tab query failed: {0}")]
    TabQuery(String),
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

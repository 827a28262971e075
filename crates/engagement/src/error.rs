//! Error types for the persistence store.
//!
//! These never reach callers of the tracker or session: both degrade to
//! in-memory state when the store fails. They surface only when a store is
//! used directly, e.g. when the CLI opens its file store.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::KeyValueStore)
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error while reading or writing the backing file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file is not a JSON object of string values
    #[error("Malformed store contents: {0}")]
    Json(#[from] serde_json::Error),

    /// Store cannot serve requests at all
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;

//! Error types for the catalog crate.
//!
//! Only snapshot loading can fail. Once a [`Catalog`](crate::Catalog) is
//! built, every lookup returns an `Option` instead of an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating a snapshot
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Snapshot file is missing from the snapshot directory
    #[error("Snapshot file not found: {path}")]
    MissingFile { path: PathBuf },

    /// I/O error occurred while reading a snapshot file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot file is not valid JSON for its record type
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two records in one collection share an id
    #[error("Duplicate id {id} in {collection}")]
    DuplicateId { collection: String, id: String },

    /// A textual enum value (role, event type) was not recognised
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;

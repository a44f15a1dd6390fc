//! Storage error types.

use thiserror::Error;

/// A per-record decode failure.
///
/// These are caught at the batch-load boundary, logged with the offending
/// hologram name, and the single record is skipped; they never abort loading
/// the remaining records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The record references a world the resolver does not know.
    #[error("world '{0}' is not loaded")]
    WorldNotFound(String),

    /// The record is structurally corrupt (bad coordinates, line index gap).
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// No record with this name exists in the document.
    #[error("no saved hologram named '{0}'")]
    HologramNotFound(String),
}

/// A file-level persistence failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or replacing the database file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The database file is not valid JSON.
    #[error("malformed database file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for file-level storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

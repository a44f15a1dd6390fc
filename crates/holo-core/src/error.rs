//! Model error types.

use thiserror::Error;

/// Errors raised by misuse of the model API.
///
/// These indicate a bug in the calling layer, not data corruption, and
/// always propagate to the immediate caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HologramError {
    /// A hologram with this name (ignoring case) is already registered.
    #[error("a hologram named '{0}' already exists")]
    DuplicateName(String),

    /// A line index outside the valid range for the operation.
    #[error("line index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Hologram names must be non-empty.
    #[error("hologram name cannot be empty")]
    EmptyName,
}

/// Result type for model operations.
pub type HologramResult<T> = Result<T, HologramError>;

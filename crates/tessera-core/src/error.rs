//! Core errors.

use thiserror::Error;

/// Errors raised while preparing table input.
///
/// Rendering and interaction never fail; these only surface from
/// conversions the host opts into.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A dataset entry could not be used as a record.
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// No column with the given key.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

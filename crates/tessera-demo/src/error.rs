//! Demo errors.

use tessera_core::CoreError;
use thiserror::Error;

/// Errors raised while preparing a demo session.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Reading a dataset failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not a list of records.
    #[error("Invalid dataset: {0}")]
    Dataset(#[from] CoreError),

    /// A record does not match the user schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No catalog story with the given name.
    #[error("Unknown story: {0} (run `tessera-demo catalog --list`)")]
    UnknownStory(String),
}

use thiserror::Error;

use crate::playlist::utils::format_seconds;

/// Reasons a selection request produced no songs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No songs match {criterion}")]
    EmptyCandidateSet { criterion: String },

    #[error(
        "No combination of songs found with a total time between {} and {}",
        format_seconds(*min_seconds),
        format_seconds(*max_seconds)
    )]
    NoCombinationFound { min_seconds: u32, max_seconds: u32 },
}

/// Failures reading or writing the key/value storage
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

//! Store error types.

use thiserror::Error;

/// Errors that can occur while reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write the state file.
    #[error("Failed to access state file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The state file or a stored value is not valid JSON.
    #[error("Invalid JSON in '{context}': {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

use thiserror::Error;

/// Errors from playbook (de)serialization and stores.
#[derive(Debug, Error)]
pub enum PlaybookError {
    /// Playbook JSON could not be read or written.
    #[error("invalid playbook json: {0}")]
    Json(#[from] serde_json::Error),

    /// A value stored under `key` is not what the store expects.
    #[error("malformed value under {key:?}: {source}")]
    Stored {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backing store refused a write.
    #[error("store write failed for {key:?}: {message}")]
    Store { key: String, message: String },
}

/// Result type for playbook operations.
pub type PlaybookResult<T> = Result<T, PlaybookError>;

/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored value could not be interpreted
    #[error("Malformed storage entry {key}: {reason}")]
    MalformedEntry { key: String, reason: String },

    /// Some keys could not be written
    #[error("Failed to save {}", failed.join(", "))]
    SaveIncomplete { failed: Vec<String> },

    /// Key-value backend error
    #[error(transparent)]
    Backend(#[from] flow_core::FlowError),

    /// Serialization/deserialization error
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a malformed entry error
    pub fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedEntry {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<StorageError> for flow_core::FlowError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Backend(inner) => inner,
            other => flow_core::FlowError::storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_save_lists_keys() {
        let err = StorageError::SaveIncomplete {
            failed: vec!["musicflow_volume".to_string(), "musicflow_playlists".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Failed to save musicflow_volume, musicflow_playlists"
        );
    }

    #[test]
    fn converts_into_core_error() {
        let err: flow_core::FlowError = StorageError::malformed("k", "bad").into();
        assert!(matches!(err, flow_core::FlowError::Storage(_)));
    }
}

/// Core error types for Flow Player
use thiserror::Error;

/// Result type alias using `FlowError`
pub type Result<T> = std::result::Result<T, FlowError>;

/// Core error type for Flow Player
#[derive(Error, Debug)]
pub enum FlowError {
    /// Key-value storage backend errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Media resource errors
    #[error("Media error: {0}")]
    Media(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input (surfaced to the user, operation aborted)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl FlowError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a media error
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = FlowError::not_found("Track", "42");
        assert_eq!(err.to_string(), "Track not found: 42");
    }

    #[test]
    fn serde_errors_convert() {
        let err: FlowError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, FlowError::Serialization(_)));
    }
}

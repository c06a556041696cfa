//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// Queue index outside the bounds of the queue
    #[error("Queue index {index} out of range (queue length {len})")]
    OutOfRange { index: usize, len: usize },

    /// Play requested with nothing loaded, queued or browsable
    #[error("No track available to play")]
    EmptySource,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

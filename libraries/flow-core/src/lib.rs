//! Flow Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Flow Player.
//!
//! This crate provides the foundational building blocks shared by the playback
//! controller, the persistence gateway and the player session.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `LocalFile`, `RepeatMode`, etc.
//! - **Core Traits**: `MediaResource` (the single playable element the host
//!   provides) and `KeyValueStore` (durable string storage)
//! - **Error Handling**: Unified `FlowError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use flow_core::types::{Playlist, Track, TrackLength};
//!
//! let track = Track::new("1", "Blinding Lights", "The Weeknd")
//!     .with_album("After Hours")
//!     .with_length(TrackLength::label("3:20"));
//!
//! let playlist = Playlist::new("Road Trip", "Songs for the highway");
//! assert!(playlist.tracks.is_empty());
//! assert_eq!(track.album.as_deref(), Some("After Hours"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{FlowError, Result};
pub use traits::{KeyValueStore, MediaResource};

pub use types::{
    FileDescriptor, LoadId, LocalFile, MediaEvent, MediaStatus, Playlist, PlaylistId, RepeatMode,
    Track, TrackId, TrackLength, DEFAULT_VOLUME,
};

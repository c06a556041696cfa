//! Flow Player - Player Session
//!
//! Ties the transport controller, the persisted user library and the sample
//! catalog into one player instance driven by intents.
//!
//! The view layer sends [`Intent`]s (button presses, search input, media
//! element status) and receives [`Signal`]s back: what to render in the main
//! content area, the state of every player surface, and toasts.
//!
//! # Example
//!
//! ```rust
//! use flow_playback::{PlaybackConfig, RecordingMedia};
//! use flow_session::{Intent, PlayerSession, Signal};
//! use flow_storage::MemoryStore;
//!
//! let mut session = PlayerSession::new(RecordingMedia::new(), MemoryStore::new(), PlaybackConfig::default());
//! let first_paint = session.start();
//! assert_eq!(first_paint.len(), 2);
//!
//! // Nothing loaded yet: play starts the first catalog song
//! let signals = session.dispatch(Intent::TogglePlay);
//! assert!(matches!(signals.last(), Some(Signal::Transport { .. })));
//! assert_eq!(session.controller().current_track().unwrap().title, "Blinding Lights");
//! ```

#![deny(unsafe_code)]

pub mod catalog;
pub mod format;
pub mod intent;
pub mod library;
pub mod session;
pub mod signal;

#[cfg(feature = "wasm")]
#[allow(unsafe_code)]
pub mod wasm;

pub use catalog::{Album, Artist, Catalog, PlaylistCard, PlaylistKind, SearchResults};
pub use format::{format_file_size, format_time};
pub use intent::{Intent, LibraryTab, View};
pub use library::Favorites;
pub use session::PlayerSession;
pub use signal::{
    LibraryContent, LocalFileRow, PlayerSurfaces, QueuePanel, Severity, Signal, TrackRow,
    ViewPayload,
};

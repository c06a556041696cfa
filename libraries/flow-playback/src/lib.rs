//! Flow Player - Transport Control
//!
//! Platform-agnostic queue and transport management for Flow Player.
//!
//! This crate provides:
//! - Playback queue (ordered, duplicate-free, with a current pointer)
//! - Transport controller (play/pause/seek/advance against one media resource)
//! - Shuffle (random pick, stored order untouched) and repeat modes (none, one, all)
//! - Volume with mute memory
//! - Transport events for keeping every player surface in sync
//!
//! # Architecture
//!
//! `flow-playback` never touches a browser or an audio device. The host hands
//! the controller a [`MediaResource`](flow_core::MediaResource) and feeds its
//! status reports back through [`TransportController::on_media_event`].
//!
//! # Example
//!
//! ```rust
//! use flow_core::{MediaEvent, MediaStatus, Track};
//! use flow_playback::{Direction, PlaybackConfig, RecordingMedia, TransportController};
//!
//! let mut controller = TransportController::new(RecordingMedia::new(), PlaybackConfig::default());
//!
//! let tracks = vec![
//!     Track::new("1", "Blinding Lights", "The Weeknd").with_source("blinding-lights.mp3"),
//!     Track::new("2", "Shape of You", "Ed Sheeran").with_source("shape-of-you.mp3"),
//! ];
//!
//! // Nothing loaded: play the first track of what the user is browsing
//! controller.play(&tracks).unwrap();
//!
//! // The host reports back what the media element actually did
//! let load = controller.current_load();
//! controller.on_media_event(MediaStatus::new(load, MediaEvent::Play));
//! assert!(controller.is_playing());
//!
//! controller.load_track(tracks[1].clone());
//! controller.advance(Direction::Previous).unwrap();
//! assert_eq!(controller.current_track().unwrap().id, "1");
//!
//! for event in controller.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```

#![forbid(unsafe_code)]

pub mod controller;
pub mod error;
pub mod events;
pub mod media;
pub mod queue;
pub mod types;
pub mod volume;

pub use controller::TransportController;
pub use error::{PlaybackError, Result};
pub use events::TransportEvent;
pub use media::{MediaCommand, RecordingMedia};
pub use queue::{NextIndex, Queue};
pub use types::{Direction, PlaybackConfig, TransportPhase, TransportSnapshot, DEFAULT_VOLUME};
pub use volume::Volume;

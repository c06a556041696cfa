//! Transport Events
//!
//! Event-based communication for UI synchronization. The controller queues
//! an event for every observable transition; the owner drains them after each
//! call and re-renders every player surface from one snapshot.

use flow_core::{LoadId, RepeatMode, Track};
use serde::{Deserialize, Serialize};

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportEvent {
    /// A new track was handed to the media resource
    ///
    /// Owners persist the track as "last played" on this event.
    TrackLoaded {
        /// The loaded track
        track: Track,
        /// Load generation stamped on its media events
        load: LoadId,
    },

    /// Media reported play or pause
    PlayStateChanged {
        /// Whether the media is now playing
        is_playing: bool,
    },

    /// Queue pointer or length changed without a load
    QueueChanged {
        /// New current index
        index: Option<usize>,
        /// Queue length
        length: usize,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// New shuffle state
        enabled: bool,
    },

    /// Repeat mode cycled
    RepeatChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    /// User volume setting changed
    VolumeChanged {
        /// New volume (0.0 - 1.0)
        volume: f32,
    },

    /// Output muted or unmuted
    MuteChanged {
        /// Whether output is now silent
        muted: bool,
    },

    /// Playhead moved
    PositionChanged {
        /// Position in seconds
        position: f64,
    },

    /// Duration became known (or unknown)
    DurationChanged {
        /// Duration in seconds
        duration: Option<f64>,
    },
}

impl TransportEvent {
    /// Whether the owner should write state to storage in response
    pub fn needs_persist(&self) -> bool {
        matches!(self, Self::TrackLoaded { .. } | Self::VolumeChanged { .. })
    }
}

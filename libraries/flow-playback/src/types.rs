//! Core types for transport control

use flow_core::{RepeatMode, Track};
use serde::{Deserialize, Serialize};

pub use flow_core::DEFAULT_VOLUME;

/// Configuration for the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0 - 1.0, default: 0.8)
    pub volume: f32,

    /// Initial shuffle state (default: off)
    pub shuffle: bool,

    /// Initial repeat mode (default: none)
    pub repeat: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            shuffle: false,
            repeat: RepeatMode::None,
        }
    }
}

/// Step direction through the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the end of the queue
    Next,
    /// Towards the start of the queue
    Previous,
}

/// Transport phase, derived from the current track and play state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportPhase {
    /// Nothing loaded
    Idle,

    /// Track loaded, media not playing
    LoadedPaused,

    /// Track loaded and the media reports playing
    LoadedPlaying,
}

impl TransportPhase {
    /// Derive the phase from the controller's observable state
    pub fn derive(has_track: bool, is_playing: bool) -> Self {
        match (has_track, is_playing) {
            (false, _) => Self::Idle,
            (true, false) => Self::LoadedPaused,
            (true, true) => Self::LoadedPlaying,
        }
    }
}

/// Everything the player surfaces need to render transport controls
///
/// Mini-player, full-screen player and queue panel all render from the same
/// snapshot, so they never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportSnapshot {
    /// Loaded track
    pub current_track: Option<Track>,

    /// Derived phase
    pub phase: TransportPhase,

    /// Last play state reported by the media resource
    pub is_playing: bool,

    /// Shuffle enabled
    pub shuffle: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// User volume setting (0.0 - 1.0)
    pub volume: f32,

    /// Output currently silenced
    pub muted: bool,

    /// Playhead position in seconds
    pub position: f64,

    /// Duration in seconds, `None` while unknown
    pub duration: Option<f64>,

    /// Queue position, `None` while the queue is empty
    pub queue_index: Option<usize>,

    /// Queue length
    pub queue_len: usize,
}

impl TransportSnapshot {
    /// Playhead as a fraction of the duration (0.0 when unknown)
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(duration) if duration > 0.0 => (self.position / duration).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 0.8);
        assert!(!config.shuffle);
        assert_eq!(config.repeat, RepeatMode::None);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"repeat":"all"}"#).unwrap();
        assert_eq!(config.repeat, RepeatMode::All);
        assert_eq!(config.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn phase_derivation() {
        assert_eq!(TransportPhase::derive(false, true), TransportPhase::Idle);
        assert_eq!(TransportPhase::derive(true, false), TransportPhase::LoadedPaused);
        assert_eq!(TransportPhase::derive(true, true), TransportPhase::LoadedPlaying);
    }
}

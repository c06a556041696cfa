/// Media resource status types
use serde::{Deserialize, Serialize};

/// Default user volume for a fresh install (0.0 - 1.0)
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Generation counter for media loads
///
/// Every call to `MediaResource::load` gets a fresh id. Status events carry
/// the id of the load they were produced for; anything older than the
/// controller's current load is stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadId(u64);

impl LoadId {
    /// Wrap a raw generation value
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The id following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw generation value
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Status callback reported by the media resource
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaEvent {
    /// Playhead moved
    TimeUpdate {
        /// Position in seconds
        position: f64,
    },

    /// Source played to the end
    Ended,

    /// Duration became known (NaN or infinite when the source cannot tell)
    MetadataLoaded {
        /// Duration in seconds
        duration: f64,
    },

    /// Playback actually started
    Play,

    /// Playback actually paused
    Pause,
}

/// A media event tagged with the load that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediaStatus {
    /// Load the event belongs to
    pub load: LoadId,

    /// What happened
    pub event: MediaEvent,
}

impl MediaStatus {
    /// Tag an event with its load
    pub const fn new(load: LoadId, event: MediaEvent) -> Self {
        Self { load, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_ids_increase() {
        let first = LoadId::default();
        assert_eq!(first.get(), 0);
        assert!(first.next() > first);
        assert_eq!(first.next().next().get(), 2);
    }

    #[test]
    fn media_events_use_tagged_json() {
        let status = MediaStatus::new(LoadId::new(3), MediaEvent::TimeUpdate { position: 1.5 });
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"load":3,"event":{"type":"time_update","position":1.5}}"#);

        let ended: MediaEvent = serde_json::from_str(r#"{"type":"ended"}"#).unwrap();
        assert_eq!(ended, MediaEvent::Ended);
    }
}

/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playable track
///
/// Immutable once created. Catalog tracks come from catalog data; local tracks
/// are synthesized from an imported file's URL (see [`Track::local`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Track length, either known seconds or a display label
    #[serde(default)]
    pub duration: TrackLength,

    /// Cover-art reference
    #[serde(default)]
    pub cover: Option<String>,

    /// Playable source reference (URL). Empty for catalog entries without a preview.
    #[serde(default, alias = "url", alias = "previewUrl")]
    pub source: String,
}

impl Track {
    /// Create a track with minimal metadata
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: None,
            duration: TrackLength::default(),
            cover: None,
            source: String::new(),
        }
    }

    /// Synthesize a track for a user-imported local file
    ///
    /// The title is the last path segment of the URL.
    pub fn local(url: impl Into<String>, timestamp_ms: i64) -> Self {
        let url = url.into();
        let title = url.rsplit('/').next().unwrap_or_default().to_string();

        Self {
            id: TrackId::local(timestamp_ms),
            title,
            artist: "Local File".to_string(),
            album: Some("Local Files".to_string()),
            duration: TrackLength::default(),
            cover: None,
            source: url,
        }
    }

    /// Set the album
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the track length
    #[must_use]
    pub fn with_length(mut self, duration: TrackLength) -> Self {
        self.duration = duration;
        self
    }

    /// Set the cover-art reference
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Set the playable source
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Track length as provided by the catalog
///
/// Catalog data ships display strings (`"3:20"`), while media metadata
/// reports seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackLength {
    /// Length in seconds
    Seconds(f64),
    /// Preformatted label
    Label(String),
}

impl TrackLength {
    /// Length from a display label
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }

    /// Length in seconds, when known
    pub fn seconds(&self) -> Option<f64> {
        match self {
            Self::Seconds(secs) => Some(*secs),
            Self::Label(_) => None,
        }
    }
}

impl Default for TrackLength {
    fn default() -> Self {
        Self::Label("Unknown".to_string())
    }
}

impl fmt::Display for TrackLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(secs) => f.write_str(&format_time(*secs)),
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Format seconds as `m:ss`
///
/// NaN, infinite and negative inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_track_uses_last_url_segment() {
        let track = Track::local("blob:http://localhost/abc/song.mp3", 42);
        assert_eq!(track.id.as_str(), "local-42");
        assert_eq!(track.title, "song.mp3");
        assert_eq!(track.artist, "Local File");
        assert_eq!(track.album.as_deref(), Some("Local Files"));
        assert_eq!(track.duration.to_string(), "Unknown");
        assert_eq!(track.source, "blob:http://localhost/abc/song.mp3");
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.9), "1:05");
        assert_eq!(format_time(200.0), "3:20");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn track_length_accepts_labels_and_numbers() {
        let label: TrackLength = serde_json::from_str("\"3:45\"").unwrap();
        assert_eq!(label, TrackLength::label("3:45"));
        assert_eq!(label.seconds(), None);

        let secs: TrackLength = serde_json::from_str("125").unwrap();
        assert_eq!(secs.seconds(), Some(125.0));
        assert_eq!(secs.to_string(), "2:05");
    }

    #[test]
    fn reads_browser_style_track_json() {
        let json = r#"{"id":"3","title":"Save Your Tears","artist":"The Weeknd",
            "album":"After Hours","duration":"3:35","cover":"c.png","previewUrl":"p.mp3"}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, "3");
        assert_eq!(track.source, "p.mp3");
        assert_eq!(track.duration, TrackLength::label("3:35"));
    }
}

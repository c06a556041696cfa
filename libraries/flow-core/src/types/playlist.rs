/// Playlist domain types
use crate::types::{PlaylistId, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-owned playlist
///
/// Created and destroyed only through explicit user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Free-form description (may be empty)
    #[serde(default)]
    pub description: String,

    /// Cover-art reference
    #[serde(default)]
    pub cover: Option<String>,

    /// Ordered track references
    #[serde(default, alias = "songs")]
    pub tracks: Vec<TrackId>,

    /// Creation timestamp
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new, empty playlist
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            name: name.into(),
            description: description.into(),
            cover: None,
            tracks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Set the cover-art reference
    #[must_use]
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }
}

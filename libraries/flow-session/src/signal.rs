//! Signals: everything the session asks the view layer to show

use crate::catalog::{Album, Artist, PlaylistCard, SearchResults};
use crate::format::{format_file_size, format_time};
use crate::intent::LibraryTab;
use flow_core::{LocalFile, Track};
use flow_playback::TransportSnapshot;
use serde::{Deserialize, Serialize};

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// A message to the view layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    /// Replace the main content area
    Render {
        payload: ViewPayload,
    },

    /// Re-render every player surface (mini-player, full-screen, queue panel)
    Transport {
        surfaces: Box<PlayerSurfaces>,
    },

    /// Short-lived notification
    Toast {
        message: String,
        severity: Severity,
    },
}

impl Signal {
    pub fn render(payload: ViewPayload) -> Self {
        Self::Render { payload }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::Toast {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Toast {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// A song row or card with its like state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRow {
    pub track: Track,
    pub is_favorite: bool,
}

/// An imported file with its display size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalFileRow {
    pub file: LocalFile,
    pub size_label: String,
}

impl From<&LocalFile> for LocalFileRow {
    fn from(file: &LocalFile) -> Self {
        Self {
            size_label: format_file_size(file.size),
            file: file.clone(),
        }
    }
}

/// Contents of a library tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tab", content = "items", rename_all = "lowercase")]
pub enum LibraryContent {
    Songs(Vec<TrackRow>),
    Albums(Vec<Album>),
    Artists(Vec<Artist>),
    Playlists(Vec<PlaylistCard>),
}

impl LibraryContent {
    pub fn tab(&self) -> LibraryTab {
        match self {
            Self::Songs(_) => LibraryTab::Songs,
            Self::Albums(_) => LibraryTab::Albums,
            Self::Artists(_) => LibraryTab::Artists,
            Self::Playlists(_) => LibraryTab::Playlists,
        }
    }
}

/// Data for one main-content view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewPayload {
    Home {
        recently_played: Vec<TrackRow>,
        top_artists: Vec<Artist>,
        made_for_you: Vec<PlaylistCard>,
        trending: Vec<TrackRow>,
    },
    Playlists {
        playlists: Vec<PlaylistCard>,
        /// Sidebar shows the first few user playlists
        sidebar: Vec<PlaylistCard>,
    },
    Favorites {
        tracks: Vec<TrackRow>,
        /// True when there are no favorites and catalog songs are shown instead
        suggestions: bool,
    },
    Library {
        content: LibraryContent,
    },
    Local {
        files: Vec<LocalFileRow>,
    },
    Search {
        query: String,
        results: SearchResults,
    },
}

/// Queue panel contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuePanel {
    /// Entries after the current one
    pub upcoming: Vec<Track>,
    /// Entries up to and including the current one, most recent first
    pub recently_played: Vec<Track>,
}

/// What every player surface renders from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSurfaces {
    pub transport: TransportSnapshot,

    /// Track shown in the player: the loaded one, else the last one played
    pub display_track: Option<Track>,

    /// Like state of the displayed track
    pub is_favorite: bool,

    pub position_label: String,
    pub duration_label: String,

    pub queue: QueuePanel,
}

impl PlayerSurfaces {
    /// Assemble surfaces from a transport snapshot
    pub fn new(
        transport: TransportSnapshot,
        display_track: Option<Track>,
        is_favorite: bool,
        queue: QueuePanel,
    ) -> Self {
        Self {
            position_label: format_time(transport.position),
            duration_label: format_time(transport.duration.unwrap_or(f64::NAN)),
            transport,
            display_track,
            is_favorite,
            queue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_serializes_for_view_layer() {
        let json = serde_json::to_value(Signal::error("Please enter a playlist name")).unwrap();
        assert_eq!(json["type"], "toast");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["message"], "Please enter a playlist name");
    }

    #[test]
    fn local_rows_carry_size_label() {
        let file = LocalFile {
            name: "a.mp3".to_string(),
            size: 1536,
            mime_type: "audio/mpeg".to_string(),
            url: "blob:a".to_string(),
            added_at: chrono::Utc::now(),
        };
        assert_eq!(LocalFileRow::from(&file).size_label, "1.5 KB");
    }
}

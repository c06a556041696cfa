//! Intents: everything the view layer can ask the session to do

use flow_core::{FileDescriptor, FlowError, MediaStatus, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Library view tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryTab {
    #[default]
    Songs,
    Albums,
    Artists,
    Playlists,
}

impl LibraryTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Songs => "songs",
            Self::Albums => "albums",
            Self::Artists => "artists",
            Self::Playlists => "playlists",
        }
    }
}

/// Navigable view
///
/// Written as `home`, `playlists`, `favorites`, `local`, `library` or
/// `library/<tab>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum View {
    #[default]
    Home,
    Playlists,
    Favorites,
    Library(LibraryTab),
    Local,
}

impl FromStr for View {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let view = match s.trim() {
            "home" => Self::Home,
            "playlists" => Self::Playlists,
            "favorites" => Self::Favorites,
            "local" => Self::Local,
            "library" | "library/songs" => Self::Library(LibraryTab::Songs),
            "library/albums" => Self::Library(LibraryTab::Albums),
            "library/artists" => Self::Library(LibraryTab::Artists),
            "library/playlists" => Self::Library(LibraryTab::Playlists),
            other => return Err(FlowError::invalid_input(format!("unknown view {:?}", other))),
        };
        Ok(view)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::Playlists => f.write_str("playlists"),
            Self::Favorites => f.write_str("favorites"),
            Self::Local => f.write_str("local"),
            Self::Library(tab) => write!(f, "library/{}", tab.as_str()),
        }
    }
}

impl TryFrom<String> for View {
    type Error = FlowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<View> for String {
    fn from(view: View) -> Self {
        view.to_string()
    }
}

/// A request from the view layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Intent {
    /// Show a view
    Navigate(View),
    /// Search input changed
    Search(String),
    /// Search box cleared
    ClearSearch,
    /// Play a track by id
    PlayTrack(TrackId),
    /// Play an imported local file by URL
    PlayLocalFile(String),
    /// Play/pause button
    TogglePlay,
    Pause,
    Next,
    Previous,
    ToggleShuffle,
    CycleRepeat,
    /// Seek to a fraction (0.0 - 1.0) of the duration
    Seek(f64),
    /// Volume slider (0.0 - 1.0)
    SetVolume(f32),
    ToggleMute,
    /// Like/unlike a track by id
    ToggleFavorite(TrackId),
    /// Like/unlike whatever is loaded
    ToggleFavoriteCurrent,
    /// Create-playlist dialog submitted
    CreatePlaylist {
        name: String,
        #[serde(default)]
        description: String,
    },
    /// Files dropped or picked
    ImportFiles(Vec<FileDescriptor>),
    /// Queue panel entry selected
    JumpToQueueIndex(usize),
    /// Status report from the media element
    Media(MediaStatus),
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::{LoadId, MediaEvent};

    #[test]
    fn view_parsing() {
        assert_eq!("home".parse::<View>().unwrap(), View::Home);
        assert_eq!(
            "library".parse::<View>().unwrap(),
            View::Library(LibraryTab::Songs)
        );
        assert_eq!(
            "library/albums".parse::<View>().unwrap(),
            View::Library(LibraryTab::Albums)
        );
        assert!("settings".parse::<View>().is_err());
    }

    #[test]
    fn view_display_parses_back() {
        for view in [
            View::Home,
            View::Local,
            View::Library(LibraryTab::Artists),
        ] {
            assert_eq!(view.to_string().parse::<View>().unwrap(), view);
        }
    }

    #[test]
    fn intents_from_view_layer_json() {
        let intent: Intent =
            serde_json::from_str(r#"{"type":"navigate","payload":"library/playlists"}"#).unwrap();
        assert_eq!(intent, Intent::Navigate(View::Library(LibraryTab::Playlists)));

        let intent: Intent = serde_json::from_str(r#"{"type":"toggle_play"}"#).unwrap();
        assert_eq!(intent, Intent::TogglePlay);

        let intent: Intent =
            serde_json::from_str(r#"{"type":"create_playlist","payload":{"name":"Mine"}}"#).unwrap();
        assert_eq!(
            intent,
            Intent::CreatePlaylist {
                name: "Mine".to_string(),
                description: String::new()
            }
        );

        let intent: Intent = serde_json::from_str(
            r#"{"type":"media","payload":{"load":2,"event":{"type":"ended"}}}"#,
        )
        .unwrap();
        assert_eq!(
            intent,
            Intent::Media(MediaStatus::new(LoadId::new(2), MediaEvent::Ended))
        );
    }

    #[test]
    fn unknown_view_rejected_in_json() {
        let result = serde_json::from_str::<Intent>(r#"{"type":"navigate","payload":"settings"}"#);
        assert!(result.is_err());
    }
}

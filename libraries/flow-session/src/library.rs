//! User library: favorites, playlists and imported local files

use chrono::{DateTime, Utc};
use flow_core::{FileDescriptor, FlowError, LocalFile, Playlist, Result, Track, TrackId};
use rand::Rng;

/// Favorite tracks
///
/// An ordered set: membership is by track id, iteration follows insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    tracks: Vec<Track>,
}

impl Favorites {
    /// Build from persisted tracks, dropping repeated ids
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let mut favorites = Self::default();
        for track in tracks {
            if !favorites.contains(&track.id) {
                favorites.tracks.push(track);
            }
        }
        favorites
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == id)
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Add a track; returns false when it was already a favorite
    pub fn insert(&mut self, track: Track) -> bool {
        if self.contains(&track.id) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Remove by id; returns the removed track
    pub fn remove(&mut self, id: &TrackId) -> Option<Track> {
        let index = self.tracks.iter().position(|t| &t.id == id)?;
        Some(self.tracks.remove(index))
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

const COVER_FALLBACK_INITIAL: char = 'P';

/// Build a new playlist from user input
///
/// Name and description are trimmed. The cover is a placeholder with a
/// random background colour and the name's first letter or digit.
///
/// # Errors
///
/// [`FlowError::InvalidInput`] when the trimmed name is empty.
pub fn new_playlist(name: &str, description: &str) -> Result<Playlist> {
    let name = name.trim();
    let description = description.trim();

    if name.is_empty() {
        return Err(FlowError::invalid_input("Please enter a playlist name"));
    }

    // Only URL-safe characters go into the query string
    let initial = name
        .chars()
        .find(char::is_ascii_alphanumeric)
        .unwrap_or(COVER_FALLBACK_INITIAL);

    let color: u32 = rand::thread_rng().gen_range(0..0x00FF_FFFF);
    let cover = format!(
        "https://via.placeholder.com/200x200/{:06x}/fff?text={}",
        color, initial
    );

    Ok(Playlist::new(name, description).with_cover(cover))
}

/// Register the audio files among `files`
///
/// Anything whose MIME type is not `audio/*` is skipped.
pub fn import_audio_files(
    files: impl IntoIterator<Item = FileDescriptor>,
    added_at: DateTime<Utc>,
) -> Vec<LocalFile> {
    files
        .into_iter()
        .filter(FileDescriptor::is_audio)
        .map(|file| LocalFile::from_descriptor(file, added_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, format!("Song {}", id), "Artist")
    }

    fn file(name: &str, mime: &str) -> FileDescriptor {
        FileDescriptor {
            name: name.to_string(),
            size: 1024,
            mime_type: mime.to_string(),
            url: format!("blob:{}", name),
        }
    }

    #[test]
    fn favorites_keep_insertion_order() {
        let mut favorites = Favorites::default();
        assert!(favorites.insert(track("3")));
        assert!(favorites.insert(track("1")));
        assert!(!favorites.insert(track("3")));

        let ids: Vec<_> = favorites.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
    }

    #[test]
    fn favorites_from_persisted_dedup() {
        let favorites = Favorites::from_tracks(vec![track("1"), track("2"), track("1")]);
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn remove_favorite() {
        let mut favorites = Favorites::from_tracks(vec![track("1"), track("2")]);
        assert_eq!(favorites.remove(&"1".into()).unwrap().id, "1");
        assert!(favorites.remove(&"1".into()).is_none());
        assert!(!favorites.contains(&"1".into()));
    }

    #[test]
    fn playlist_name_is_trimmed() {
        let playlist = new_playlist("  Road Trip ", " highway ").unwrap();
        assert_eq!(playlist.name, "Road Trip");
        assert_eq!(playlist.description, "highway");
        assert!(playlist.cover.unwrap().ends_with("?text=R"));
        assert!(playlist.tracks.is_empty());
        assert!(playlist.id.as_str().starts_with("playlist-"));
    }

    #[test]
    fn cover_text_stays_url_safe() {
        let cover = new_playlist("#1 Hits", "").unwrap().cover.unwrap();
        assert!(cover.ends_with("?text=1"));

        let cover = new_playlist("&?!", "").unwrap().cover.unwrap();
        assert!(cover.ends_with("?text=P"));
        assert_eq!(cover.matches('?').count(), 1);
    }

    #[test]
    fn blank_playlist_name_rejected() {
        let err = new_playlist("   ", "whatever").unwrap_err();
        assert!(matches!(err, FlowError::InvalidInput(_)));
    }

    #[test]
    fn only_audio_files_imported() {
        let now = Utc::now();
        let imported = import_audio_files(
            vec![
                file("a.mp3", "audio/mpeg"),
                file("cover.png", "image/png"),
                file("b.flac", "audio/flac"),
            ],
            now,
        );

        let names: Vec<_> = imported.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.mp3", "b.flac"]);
        assert!(imported.iter().all(|f| f.added_at == now));
    }
}

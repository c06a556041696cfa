//! Browsable catalog
//!
//! The fixed sample library the player ships with: songs, artists, albums and
//! featured playlists. Also the search over all of them.

use flow_core::{Track, TrackId, TrackLength};
use serde::{Deserialize, Serialize};

/// Artist card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub image: String,
}

/// Album card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub title: String,
    pub artist: String,
    pub cover: String,
}

/// Where a playlist card comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistKind {
    /// Created by the user
    User,
    /// Built in ("Liked Songs")
    System,
    /// Editorial catalog playlist
    Featured,
}

/// Playlist as shown in a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cover: Option<String>,
    pub kind: PlaylistKind,
}

impl PlaylistCard {
    /// Card for the built-in favorites playlist
    pub fn liked_songs() -> Self {
        Self {
            id: "liked".to_string(),
            name: "Liked Songs".to_string(),
            description: String::new(),
            cover: None,
            kind: PlaylistKind::System,
        }
    }
}

impl From<&flow_core::Playlist> for PlaylistCard {
    fn from(playlist: &flow_core::Playlist) -> Self {
        Self {
            id: playlist.id.to_string(),
            name: playlist.name.clone(),
            description: playlist.description.clone(),
            cover: playlist.cover.clone(),
            kind: PlaylistKind::User,
        }
    }
}

/// Search hits grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub songs: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub playlists: Vec<PlaylistCard>,
}

impl SearchResults {
    /// Nothing matched ("No results found")
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
            && self.artists.is_empty()
            && self.albums.is_empty()
            && self.playlists.is_empty()
    }
}

/// The browsable catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Track>,
    artists: Vec<Artist>,
    albums: Vec<Album>,
    playlists: Vec<PlaylistCard>,
}

impl Catalog {
    /// Build a catalog from parts
    pub fn new(
        songs: Vec<Track>,
        artists: Vec<Artist>,
        albums: Vec<Album>,
        playlists: Vec<PlaylistCard>,
    ) -> Self {
        Self {
            songs,
            artists,
            albums,
            playlists,
        }
    }

    /// The sample catalog every fresh player starts with
    pub fn sample() -> Self {
        let song = |id: &str, title: &str, artist: &str, album: &str, length: &str, color: &str| {
            Track::new(id, title, artist)
                .with_album(album)
                .with_length(TrackLength::label(length))
                .with_cover(format!("https://via.placeholder.com/56x56/{}/fff?text=♫", color))
        };
        let artist = |name: &str, color: &str, initials: &str| Artist {
            name: name.to_string(),
            image: format!("https://via.placeholder.com/160x160/{}/fff?text={}", color, initials),
        };
        let album = |title: &str, artist: &str, color: &str, initials: &str| Album {
            title: title.to_string(),
            artist: artist.to_string(),
            cover: format!("https://via.placeholder.com/180x180/{}/fff?text={}", color, initials),
        };
        let featured = |id: &str, name: &str, description: &str, color: &str, icon: &str| PlaylistCard {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            cover: Some(format!("https://via.placeholder.com/200x200/{}/fff?text={}", color, icon)),
            kind: PlaylistKind::Featured,
        };

        Self {
            songs: vec![
                song("1", "Blinding Lights", "The Weeknd", "After Hours", "3:20", "ff6b6b"),
                song("2", "Levitating", "Dua Lipa", "Future Nostalgia", "3:23", "845ec2"),
                song("3", "Save Your Tears", "The Weeknd", "After Hours", "3:35", "ff6b6b"),
                song("4", "Peaches", "Justin Bieber", "Justice", "3:18", "ffc75f"),
                song("5", "Montero", "Lil Nas X", "Montero", "2:17", "f9f871"),
                song("6", "Stay", "The Kid LAROI", "F*CK LOVE 3", "2:21", "00c9a7"),
                song("7", "Good 4 U", "Olivia Rodrigo", "SOUR", "2:58", "6a0572"),
                song("8", "Industry Baby", "Lil Nas X", "Montero", "3:32", "f9f871"),
                song("9", "Heat Waves", "Glass Animals", "Dreamland", "3:58", "0081af"),
                song("10", "Bad Habits", "Ed Sheeran", "=", "3:50", "ff9671"),
            ],
            artists: vec![
                artist("The Weeknd", "ff6b6b", "TW"),
                artist("Dua Lipa", "845ec2", "DL"),
                artist("Ed Sheeran", "ff9671", "ES"),
                artist("Billie Eilish", "00d2d3", "BE"),
                artist("Drake", "54a0ff", "DR"),
                artist("Ariana Grande", "5f27cd", "AG"),
            ],
            albums: vec![
                album("After Hours", "The Weeknd", "ff6b6b", "AH"),
                album("Future Nostalgia", "Dua Lipa", "845ec2", "FN"),
                album("Justice", "Justin Bieber", "ffc75f", "JU"),
                album("SOUR", "Olivia Rodrigo", "6a0572", "SO"),
                album("=", "Ed Sheeran", "ff9671", "EQ"),
                album("Montero", "Lil Nas X", "f9f871", "MO"),
            ],
            playlists: vec![
                featured("p1", "Top Hits 2024", "The hottest tracks right now", "6366f1", "🔥"),
                featured("p2", "Chill Vibes", "Relax and unwind", "10b981", "🌊"),
                featured("p3", "Workout Mix", "Power through your workout", "ef4444", "💪"),
                featured("p4", "Focus Flow", "Perfect for studying", "8b5cf6", "🎯"),
                featured("p5", "Party Playlist", "Get the party started", "f59e0b", "🎉"),
                featured("p6", "Indie Gems", "Discover new indie artists", "ec4899", "💎"),
            ],
        }
    }

    pub fn songs(&self) -> &[Track] {
        &self.songs
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn playlists(&self) -> &[PlaylistCard] {
        &self.playlists
    }

    /// Look up a catalog song
    pub fn find_track(&self, id: &TrackId) -> Option<&Track> {
        self.songs.iter().find(|t| &t.id == id)
    }

    /// Case-insensitive substring search over every catalog section
    ///
    /// Songs match on title or artist, artists on name, albums on title or
    /// artist, playlists on name.
    pub fn search(&self, query: &str) -> SearchResults {
        let needle = query.to_lowercase();
        let hit = |text: &str| text.to_lowercase().contains(&needle);

        SearchResults {
            songs: self
                .songs
                .iter()
                .filter(|s| hit(&s.title) || hit(&s.artist))
                .cloned()
                .collect(),
            artists: self.artists.iter().filter(|a| hit(&a.name)).cloned().collect(),
            albums: self
                .albums
                .iter()
                .filter(|a| hit(&a.title) || hit(&a.artist))
                .cloned()
                .collect(),
            playlists: self
                .playlists
                .iter()
                .filter(|p| hit(&p.name))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_sizes() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.songs().len(), 10);
        assert_eq!(catalog.artists().len(), 6);
        assert_eq!(catalog.albums().len(), 6);
        assert_eq!(catalog.playlists().len(), 6);
    }

    #[test]
    fn search_is_case_insensitive_across_sections() {
        let results = Catalog::sample().search("WEEKND");

        let titles: Vec<_> = results.songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Blinding Lights", "Save Your Tears"]);
        assert_eq!(results.artists.len(), 1);
        assert_eq!(results.albums[0].title, "After Hours");
        assert!(results.playlists.is_empty());
    }

    #[test]
    fn search_matches_playlist_names() {
        let results = Catalog::sample().search("vibes");
        assert_eq!(results.playlists.len(), 1);
        assert_eq!(results.playlists[0].id, "p2");
    }

    #[test]
    fn search_without_hits_is_empty() {
        assert!(Catalog::sample().search("zzzz").is_empty());
    }

    #[test]
    fn find_track_by_id() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.find_track(&"9".into()).unwrap().title, "Heat Waves");
        assert!(catalog.find_track(&"99".into()).is_none());
    }
}

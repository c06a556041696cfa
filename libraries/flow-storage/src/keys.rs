//! Storage key constants
//!
//! Names match what earlier browser builds wrote, so existing
//! `localStorage` data keeps loading.

/// Favorite tracks (JSON array of tracks)
pub const FAVORITES: &str = "musicflow_favorites";

/// User playlists (JSON array)
pub const PLAYLISTS: &str = "musicflow_playlists";

/// Imported local files (JSON array)
pub const LOCAL_FILES: &str = "musicflow_local_files";

/// Volume setting (decimal number, 0.0 - 1.0)
pub const VOLUME: &str = "musicflow_volume";

/// Last loaded track (JSON object)
pub const LAST_TRACK: &str = "musicflow_last_track";

/// Every key the gateway owns
pub const ALL: [&str; 5] = [FAVORITES, PLAYLISTS, LOCAL_FILES, VOLUME, LAST_TRACK];

mod ids;
mod local_file;
mod media;
mod playback_state;
mod playlist;
mod track;

pub use ids::{PlaylistId, TrackId};
pub use local_file::{FileDescriptor, LocalFile};
pub use media::{LoadId, MediaEvent, MediaStatus, DEFAULT_VOLUME};
pub use playback_state::RepeatMode;
pub use playlist::Playlist;
pub use track::{format_time, Track, TrackLength};

//! Persistence gateway
//!
//! Reads and writes the player's durable state over any [`KeyValueStore`].
//! Every key is independent: one corrupt entry never prevents the others
//! from loading, and there is no cross-key transaction.

use crate::error::{Result, StorageError};
use crate::keys;
use flow_core::{KeyValueStore, LocalFile, Playlist, Track};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Everything the player persists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Favorite tracks in insertion order
    pub favorites: Vec<Track>,

    /// User playlists
    pub playlists: Vec<Playlist>,

    /// Local-file registry
    pub local_files: Vec<LocalFile>,

    /// Volume setting (0.0 - 1.0), `None` when never stored or unusable
    pub volume: Option<f32>,

    /// Last loaded track
    pub last_track: Option<Track>,
}

/// Best-effort persistence over a key-value store
#[derive(Debug, Clone)]
pub struct PersistenceGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read every key
    ///
    /// Never fails: missing entries take their default, and malformed or
    /// unreadable entries are logged and replaced by the default.
    pub fn load(&self) -> Snapshot {
        let snapshot = Snapshot {
            favorites: self.read_json(keys::FAVORITES).unwrap_or_default(),
            playlists: self.read_json(keys::PLAYLISTS).unwrap_or_default(),
            local_files: self.read_json(keys::LOCAL_FILES).unwrap_or_default(),
            volume: self.read_volume(),
            last_track: self.read_json(keys::LAST_TRACK),
        };

        debug!(
            favorites = snapshot.favorites.len(),
            playlists = snapshot.playlists.len(),
            local_files = snapshot.local_files.len(),
            volume = ?snapshot.volume,
            has_last_track = snapshot.last_track.is_some(),
            "Loaded persisted state"
        );

        snapshot
    }

    /// Write every key
    ///
    /// Volume and last track are written only when present. All keys are attempted
    /// even when some fail.
    ///
    /// # Errors
    ///
    /// [`StorageError::SaveIncomplete`] naming the keys that failed.
    pub fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let mut failed = Vec::new();

        let mut attempt = |key: &str, result: Result<()>| {
            if let Err(e) = result {
                warn!(key, error = %e, "Failed to persist storage entry");
                failed.push(key.to_string());
            }
        };

        attempt(keys::FAVORITES, self.save_favorites(&snapshot.favorites));
        attempt(keys::PLAYLISTS, self.save_playlists(&snapshot.playlists));
        attempt(keys::LOCAL_FILES, self.save_local_files(&snapshot.local_files));
        if let Some(volume) = snapshot.volume {
            attempt(keys::VOLUME, self.save_volume(volume));
        }
        if let Some(track) = &snapshot.last_track {
            attempt(keys::LAST_TRACK, self.save_last_track(track));
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(StorageError::SaveIncomplete { failed })
        }
    }

    pub fn save_favorites(&mut self, favorites: &[Track]) -> Result<()> {
        self.write_json(keys::FAVORITES, &favorites)
    }

    pub fn save_playlists(&mut self, playlists: &[Playlist]) -> Result<()> {
        self.write_json(keys::PLAYLISTS, &playlists)
    }

    pub fn save_local_files(&mut self, local_files: &[LocalFile]) -> Result<()> {
        self.write_json(keys::LOCAL_FILES, &local_files)
    }

    /// Write the volume as a plain decimal
    pub fn save_volume(&mut self, volume: f32) -> Result<()> {
        self.store.set(keys::VOLUME, &volume.to_string())?;
        Ok(())
    }

    pub fn save_last_track(&mut self, track: &Track) -> Result<()> {
        self.write_json(keys::LAST_TRACK, track)
    }

    // ===== Helpers =====

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)?;
        Ok(())
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                discard(&StorageError::from(e), key);
                None
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                discard(&StorageError::malformed(key, e), key);
                None
            }
        }
    }

    fn read_volume(&self) -> Option<f32> {
        let raw = self.read_raw(keys::VOLUME)?;
        match raw.trim().parse::<f32>() {
            Ok(volume) if (0.0..=1.0).contains(&volume) => Some(volume),
            Ok(volume) => {
                discard(
                    &StorageError::malformed(keys::VOLUME, format!("{} outside 0.0 - 1.0", volume)),
                    keys::VOLUME,
                );
                None
            }
            Err(e) => {
                discard(&StorageError::malformed(keys::VOLUME, e), keys::VOLUME);
                None
            }
        }
    }
}

fn discard(err: &StorageError, key: &str) {
    warn!(key, error = %err, "Discarding storage entry, using default");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn empty_store_loads_defaults() {
        let gateway = PersistenceGateway::new(MemoryStore::new());
        assert_eq!(gateway.load(), Snapshot::default());
    }

    #[test]
    fn malformed_favorites_load_as_empty() {
        let store = MemoryStore::new()
            .with_entry(keys::FAVORITES, "{not json")
            .with_entry(keys::VOLUME, "0.4");
        let snapshot = PersistenceGateway::new(store).load();

        assert!(snapshot.favorites.is_empty());
        assert_eq!(snapshot.volume, Some(0.4));
    }

    #[test]
    fn volume_out_of_range_falls_back() {
        for raw in ["1.5", "-0.1", "NaN", "loud"] {
            let store = MemoryStore::new().with_entry(keys::VOLUME, raw);
            let snapshot = PersistenceGateway::new(store).load();
            assert_eq!(snapshot.volume, None);
        }
    }

    #[test]
    fn optional_keys_only_written_when_present() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.save(&Snapshot::default()).unwrap();

        assert!(gateway.store().get(keys::LAST_TRACK).unwrap().is_none());
        assert!(gateway.store().get(keys::VOLUME).unwrap().is_none());

        gateway.save_volume(0.8).unwrap();
        assert_eq!(gateway.store().get(keys::VOLUME).unwrap().as_deref(), Some("0.8"));
        assert_eq!(gateway.store().get(keys::FAVORITES).unwrap().as_deref(), Some("[]"));
    }
}

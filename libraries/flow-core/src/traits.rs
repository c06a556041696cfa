/// Core traits for Flow Player
use crate::error::Result;
use crate::types::LoadId;

/// The single playable media element provided by the host
///
/// Implementers wrap whatever actually produces sound: an HTML media element
/// in the browser, a simulated clock in the terminal host, a recorder in tests.
/// The transport controller holds exactly one of these and is the only code
/// that issues commands to it.
///
/// Status flows back the other way as [`MediaStatus`](crate::types::MediaStatus)
/// values stamped with the [`LoadId`] passed to [`load`](Self::load), so the
/// controller can drop reports that belong to a superseded source.
pub trait MediaResource {
    /// Replace the current source
    ///
    /// `load` identifies this source in every status event emitted for it.
    fn load(&mut self, load: LoadId, source: &str);

    /// Start or resume playback of the loaded source
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead (seconds from start)
    fn set_current_time(&mut self, seconds: f64);

    /// Set output volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Current output volume (0.0 - 1.0)
    fn volume(&self) -> f32;
}

/// Durable string key-value storage
///
/// Mirrors the browser storage API: every key is read and written
/// independently, values are opaque strings (JSON in practice).
pub trait KeyValueStore {
    /// Read a value
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: MediaResource + ?Sized> MediaResource for Box<T> {
    fn load(&mut self, load: LoadId, source: &str) {
        (**self).load(load, source);
    }

    fn play(&mut self) {
        (**self).play();
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn set_current_time(&mut self, seconds: f64) {
        (**self).set_current_time(seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }

    fn volume(&self) -> f32 {
        (**self).volume()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

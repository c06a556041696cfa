//! Volume control with mute memory
//!
//! Keeps the user's volume setting separate from what the media resource is
//! actually outputting, so muting never loses the setting.

use crate::types::DEFAULT_VOLUME;

/// Volume state
///
/// `level` is the user setting (persisted), `last_audible` is what unmute
/// restores to.
#[derive(Debug, Clone)]
pub struct Volume {
    /// User volume setting (0.0 - 1.0)
    level: f32,

    /// Last non-zero volume, restored on unmute
    last_audible: f32,
}

impl Volume {
    /// Create new volume state
    ///
    /// # Arguments
    /// * `level` - Initial volume (0.0 - 1.0, default: 0.8). NaN falls back to the default.
    pub fn new(level: f32) -> Self {
        let level = Self::sanitize(level).unwrap_or(DEFAULT_VOLUME);

        Self {
            level,
            last_audible: if level > 0.0 { level } else { DEFAULT_VOLUME },
        }
    }

    /// Set volume level, clamped to 0.0 - 1.0
    ///
    /// Returns the applied level, or `None` when the input was NaN.
    pub fn set_level(&mut self, level: f32) -> Option<f32> {
        let level = Self::sanitize(level)?;
        self.level = level;
        if level > 0.0 {
            self.last_audible = level;
        }
        Some(level)
    }

    /// Current user setting
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Output level to restore when unmuting
    pub fn unmute_level(&self) -> f32 {
        if self.last_audible > 0.0 {
            self.last_audible
        } else {
            DEFAULT_VOLUME
        }
    }

    /// Record the output level observed right before muting
    pub fn remember_audible(&mut self, output: f32) {
        if output > 0.0 && output.is_finite() {
            self.last_audible = output.min(1.0);
        }
    }

    fn sanitize(level: f32) -> Option<f32> {
        if level.is_nan() {
            None
        } else {
            Some(level.clamp(0.0, 1.0))
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(0.5);
        assert_eq!(vol.level(), 0.5);
        assert_eq!(vol.unmute_level(), 0.5);
    }

    #[test]
    fn volume_clamps() {
        let mut vol = Volume::default();
        assert_eq!(vol.set_level(1.7), Some(1.0));
        assert_eq!(vol.set_level(-0.2), Some(0.0));
        assert_eq!(vol.level(), 0.0);
    }

    #[test]
    fn nan_is_ignored() {
        let mut vol = Volume::new(0.4);
        assert_eq!(vol.set_level(f32::NAN), None);
        assert_eq!(vol.level(), 0.4);
        assert_eq!(Volume::new(f32::NAN).level(), DEFAULT_VOLUME);
    }

    #[test]
    fn zero_keeps_last_audible() {
        let mut vol = Volume::new(0.3);
        vol.set_level(0.0);
        assert_eq!(vol.unmute_level(), 0.3);
    }

    #[test]
    fn starting_at_zero_unmutes_to_default() {
        let vol = Volume::new(0.0);
        assert_eq!(vol.unmute_level(), DEFAULT_VOLUME);
    }
}

//! Recording media resource
//!
//! A [`MediaResource`] that produces no sound and records every command it
//! receives. Used by tests and by headless hosts that drive status events
//! themselves.

use flow_core::{LoadId, MediaResource};

/// A command issued to the media resource
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    /// Source replaced
    Load { load: LoadId, source: String },
    /// Playback requested
    Play,
    /// Pause requested
    Pause,
    /// Playhead moved
    Seek(f64),
    /// Output volume changed
    SetVolume(f32),
}

/// Media resource that logs commands instead of playing audio
#[derive(Debug, Clone)]
pub struct RecordingMedia {
    commands: Vec<MediaCommand>,
    volume: f32,
    active_load: Option<LoadId>,
}

impl RecordingMedia {
    /// Create with full output volume, like a fresh media element
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            volume: 1.0,
            active_load: None,
        }
    }

    /// Commands received so far, oldest first
    pub fn commands(&self) -> &[MediaCommand] {
        &self.commands
    }

    /// Take and clear the command log
    pub fn take_commands(&mut self) -> Vec<MediaCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Load id of the most recent `load`
    pub fn active_load(&self) -> Option<LoadId> {
        self.active_load
    }

    /// Source of the most recent `load`
    pub fn active_source(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            MediaCommand::Load { source, .. } => Some(source.as_str()),
            _ => None,
        })
    }
}

impl Default for RecordingMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaResource for RecordingMedia {
    fn load(&mut self, load: LoadId, source: &str) {
        self.active_load = Some(load);
        self.commands.push(MediaCommand::Load {
            load,
            source: source.to_string(),
        });
    }

    fn play(&mut self) {
        self.commands.push(MediaCommand::Play);
    }

    fn pause(&mut self) {
        self.commands.push(MediaCommand::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.commands.push(MediaCommand::Seek(seconds));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.commands.push(MediaCommand::SetVolume(volume));
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}

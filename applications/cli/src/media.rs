//! Simulated media resource
//!
//! Stands in for an audio element: keeps a playhead and reports status back
//! the way a browser would, without producing sound. The host advances time
//! with [`SimulatedMedia::tick`] and forwards [`SimulatedMedia::take_reports`]
//! to the session.

use flow_core::{LoadId, MediaEvent, MediaResource, MediaStatus};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::trace;

/// Duration reported for every source
pub const DEFAULT_SIMULATED_DURATION: f64 = 180.0;

#[derive(Debug, Default)]
struct MediaState {
    load: LoadId,
    source: Option<String>,
    playing: bool,
    position: f64,
    volume: f32,
    reports: VecDeque<MediaStatus>,
}

/// Playhead simulation shared between the controller and the host
///
/// Cloning hands out another handle to the same element, so the host can
/// keep one after giving the other to the session.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    state: Rc<RefCell<MediaState>>,
    duration: f64,
}

impl SimulatedMedia {
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_SIMULATED_DURATION)
    }

    pub fn with_duration(duration: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(MediaState {
                volume: 1.0,
                ..MediaState::default()
            })),
            duration,
        }
    }

    /// Advance the playhead by `seconds` of playback
    ///
    /// Reports a time update, and the end of the source when it is reached.
    pub fn tick(&self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        if !state.playing || state.source.is_none() {
            return;
        }

        state.position = (state.position + seconds.max(0.0)).min(self.duration);
        let (load, position) = (state.load, state.position);
        state.push(load, MediaEvent::TimeUpdate { position });

        if position >= self.duration {
            state.playing = false;
            state.push(load, MediaEvent::Ended);
        }
    }

    /// Status reports produced since the last call, oldest first
    pub fn take_reports(&self) -> Vec<MediaStatus> {
        self.state.borrow_mut().reports.drain(..).collect()
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    pub fn position(&self) -> f64 {
        self.state.borrow().position
    }

    pub fn source(&self) -> Option<String> {
        self.state.borrow().source.clone()
    }
}

impl Default for SimulatedMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaState {
    fn push(&mut self, load: LoadId, event: MediaEvent) {
        trace!(load = load.get(), ?event, "Simulated media report");
        self.reports.push_back(MediaStatus::new(load, event));
    }
}

impl MediaResource for SimulatedMedia {
    fn load(&mut self, load: LoadId, source: &str) {
        let mut state = self.state.borrow_mut();
        state.load = load;
        state.source = Some(source.to_string());
        state.position = 0.0;
        state.playing = false;
        state.push(load, MediaEvent::MetadataLoaded { duration: self.duration });
    }

    fn play(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.source.is_none() {
            return;
        }
        if state.position >= self.duration {
            state.position = 0.0;
        }
        if !state.playing {
            state.playing = true;
            let load = state.load;
            state.push(load, MediaEvent::Play);
        }
    }

    fn pause(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.playing {
            state.playing = false;
            let load = state.load;
            state.push(load, MediaEvent::Pause);
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut state = self.state.borrow_mut();
        state.position = seconds.clamp(0.0, self.duration);
        let (load, position) = (state.load, state.position);
        state.push(load, MediaEvent::TimeUpdate { position });
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = volume;
    }

    fn volume(&self) -> f32 {
        self.state.borrow().volume
    }
}

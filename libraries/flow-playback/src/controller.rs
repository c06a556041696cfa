//! Transport controller - core orchestration
//!
//! Coordinates the queue, volume and transport modes against the single
//! media resource. Every command to the media resource goes through here.

use crate::{
    error::{PlaybackError, Result},
    events::TransportEvent,
    queue::Queue,
    types::{Direction, PlaybackConfig, TransportPhase, TransportSnapshot},
    volume::Volume,
};
use flow_core::{LoadId, MediaEvent, MediaResource, MediaStatus, RepeatMode, Track};
use tracing::debug;

/// Transport controller
///
/// Owns the media resource exclusively. State changes caused by the host
/// (actual play/pause, playhead, duration) arrive through
/// [`on_media_event`](Self::on_media_event); everything else is a direct call.
/// Observable transitions are queued and handed out by
/// [`drain_events`](Self::drain_events).
pub struct TransportController<M: MediaResource> {
    // The one playable element
    media: M,

    queue: Queue,

    // Only `load_track` changes this
    current_track: Option<Track>,

    // Mirrors what the media last reported
    is_playing: bool,

    shuffle: bool,
    repeat: RepeatMode,
    volume: Volume,

    position: f64,
    duration: Option<f64>,

    // Generation of the active load; older status events are stale
    load: LoadId,

    // Event queue for UI synchronization
    pending_events: Vec<TransportEvent>,
}

impl<M: MediaResource> TransportController<M> {
    /// Create new controller and apply the configured volume to the media
    pub fn new(mut media: M, config: PlaybackConfig) -> Self {
        let volume = Volume::new(config.volume);
        media.set_volume(volume.level());

        Self {
            media,
            queue: Queue::new(),
            current_track: None,
            is_playing: false,
            shuffle: config.shuffle,
            repeat: config.repeat,
            volume,
            position: 0.0,
            duration: None,
            load: LoadId::default(),
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Start or resume playback
    ///
    /// With nothing loaded, loads the queue's current entry or, failing that,
    /// the first track of `context` (what the user is browsing).
    ///
    /// # Errors
    ///
    /// [`PlaybackError::EmptySource`] when there is nothing to play anywhere.
    pub fn play(&mut self, context: &[Track]) -> Result<()> {
        if self.current_track.is_some() {
            self.media.play();
            return Ok(());
        }

        let track = self
            .queue
            .current()
            .or_else(|| context.first())
            .cloned()
            .ok_or(PlaybackError::EmptySource)?;

        self.load_track(track);
        Ok(())
    }

    /// Pause playback
    ///
    /// Only issued while the media reports playing.
    pub fn pause(&mut self) {
        if self.phase() == TransportPhase::LoadedPlaying {
            self.media.pause();
        }
    }

    /// Pause when playing, otherwise [`play`](Self::play)
    pub fn toggle_play(&mut self, context: &[Track]) -> Result<()> {
        if self.is_playing {
            self.pause();
            Ok(())
        } else {
            self.play(context)
        }
    }

    /// Load a track into the media resource and start it
    ///
    /// The track is appended to the queue unless already queued, and the
    /// queue pointer moves to it.
    pub fn load_track(&mut self, track: Track) {
        self.load = self.load.next();

        let index = self.queue.append(track.clone());
        let moved = self.queue.set_current(index);
        debug_assert!(moved.is_ok(), "appended index must be in range");

        debug!(
            track_id = %track.id,
            load = self.load.get(),
            index,
            "Loading track"
        );

        self.position = 0.0;
        self.duration = None;
        self.media.load(self.load, &track.source);
        self.media.play();

        self.current_track = Some(track.clone());
        self.emit(TransportEvent::TrackLoaded {
            track,
            load: self.load,
        });
    }

    /// Step through the queue
    ///
    /// `Previous` always loads. `Next` loads unless it wrapped past the end
    /// with shuffle off and repeat other than `All`; then the pointer rests
    /// on the first entry without loading it.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::EmptySource`] when the queue is empty.
    pub fn advance(&mut self, direction: Direction) -> Result<()> {
        match direction {
            Direction::Previous => {
                let index = self
                    .queue
                    .previous_index()
                    .ok_or(PlaybackError::EmptySource)?;
                self.load_index(index)
            }
            Direction::Next => {
                let next = self
                    .queue
                    .next_index(self.shuffle)
                    .ok_or(PlaybackError::EmptySource)?;

                if self.shuffle || !next.wrapped || self.repeat == RepeatMode::All {
                    return self.load_index(next.index);
                }

                debug!("Queue exhausted, resting on first entry");
                self.queue.set_current(next.index)?;
                self.emit(TransportEvent::QueueChanged {
                    index: self.queue.current_index(),
                    length: self.queue.len(),
                });
                Ok(())
            }
        }
    }

    /// Load the queue entry at `index` (queue panel selection)
    ///
    /// # Errors
    ///
    /// [`PlaybackError::OutOfRange`] when `index` is not a queue position.
    pub fn jump(&mut self, index: usize) -> Result<()> {
        self.load_index(index)
    }

    fn load_index(&mut self, index: usize) -> Result<()> {
        let track = self
            .queue
            .get(index)
            .cloned()
            .ok_or(PlaybackError::OutOfRange {
                index,
                len: self.queue.len(),
            })?;

        self.load_track(track);
        Ok(())
    }

    // ===== Media Callbacks =====

    /// Apply a status report from the media resource
    ///
    /// Reports stamped with a superseded load are dropped.
    pub fn on_media_event(&mut self, status: MediaStatus) {
        if self.current_track.is_none() || status.load != self.load {
            debug!(
                event_load = status.load.get(),
                active_load = self.load.get(),
                "Ignoring stale media event"
            );
            return;
        }

        match status.event {
            MediaEvent::TimeUpdate { position } => {
                if position.is_finite() {
                    self.position = position;
                    self.emit(TransportEvent::PositionChanged { position });
                }
            }
            MediaEvent::MetadataLoaded { duration } => {
                self.duration = (duration.is_finite() && duration >= 0.0).then_some(duration);
                self.emit(TransportEvent::DurationChanged {
                    duration: self.duration,
                });
            }
            MediaEvent::Play => self.set_playing(true),
            MediaEvent::Pause => self.set_playing(false),
            MediaEvent::Ended => self.on_track_ended(),
        }
    }

    /// Handle the loaded track reaching its end
    ///
    /// Repeat-one restarts in place. Otherwise moves on when there is a next
    /// entry or repeat-all is set, and stays stopped at the end of the queue.
    pub fn on_track_ended(&mut self) {
        self.set_playing(false);

        if self.repeat == RepeatMode::One {
            self.media.set_current_time(0.0);
            self.position = 0.0;
            self.media.play();
            self.emit(TransportEvent::PositionChanged { position: 0.0 });
            return;
        }

        if !self.queue.is_at_end() || self.repeat == RepeatMode::All {
            if let Err(e) = self.advance(Direction::Next) {
                debug!(error = %e, "Nothing to advance to");
            }
        } else {
            debug!("Reached end of queue");
        }
    }

    fn set_playing(&mut self, is_playing: bool) {
        if self.is_playing != is_playing {
            self.is_playing = is_playing;
            self.emit(TransportEvent::PlayStateChanged { is_playing });
        }
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle; the stored queue order is untouched
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.emit(TransportEvent::ShuffleChanged {
            enabled: self.shuffle,
        });
        self.shuffle
    }

    /// Advance repeat mode `none -> one -> all -> none`
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycled();
        self.emit(TransportEvent::RepeatChanged { mode: self.repeat });
        self.repeat
    }

    // ===== Volume =====

    /// Set volume (clamped to 0.0 - 1.0)
    ///
    /// NaN is ignored.
    pub fn set_volume(&mut self, volume: f32) {
        let Some(level) = self.volume.set_level(volume) else {
            debug!("Ignoring NaN volume");
            return;
        };

        self.media.set_volume(level);
        self.emit(TransportEvent::VolumeChanged { volume: level });
    }

    /// Silence output, or restore the last audible volume
    pub fn toggle_mute(&mut self) {
        let output = self.media.volume();

        if output > 0.0 {
            self.volume.remember_audible(output);
            self.media.set_volume(0.0);
            self.emit(TransportEvent::MuteChanged { muted: true });
        } else {
            self.media.set_volume(self.volume.unmute_level());
            self.emit(TransportEvent::MuteChanged { muted: false });
        }
    }

    // ===== Seek =====

    /// Seek to a fraction of the duration
    ///
    /// No-op while the duration is unknown.
    pub fn seek(&mut self, fraction: f64) {
        let Some(duration) = self.duration else {
            debug!("Seek ignored, duration unknown");
            return;
        };
        if !fraction.is_finite() {
            return;
        }

        let position = fraction * duration;
        self.media.set_current_time(position);
        self.position = position;
        self.emit(TransportEvent::PositionChanged { position });
    }

    // ===== State Queries =====

    /// Derived transport phase
    pub fn phase(&self) -> TransportPhase {
        TransportPhase::derive(self.current_track.is_some(), self.is_playing)
    }

    /// Loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// Last play state reported by the media
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// User volume setting
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Whether the media output is silent
    pub fn is_muted(&self) -> bool {
        self.media.volume() <= 0.0
    }

    /// Playhead in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration in seconds, when known
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Load id of the active source
    pub fn current_load(&self) -> LoadId {
        self.load
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Snapshot for rendering every player surface
    pub fn snapshot(&self) -> TransportSnapshot {
        TransportSnapshot {
            current_track: self.current_track.clone(),
            phase: self.phase(),
            is_playing: self.is_playing,
            shuffle: self.shuffle,
            repeat: self.repeat,
            volume: self.volume.level(),
            muted: self.is_muted(),
            position: self.position,
            duration: self.duration,
            queue_index: self.queue.current_index(),
            queue_len: self.queue.len(),
        }
    }

    // ===== Events =====

    fn emit(&mut self, event: TransportEvent) {
        self.pending_events.push(event);
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<TransportEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaCommand, RecordingMedia};

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), "Test Artist").with_source(format!("{}.mp3", id))
    }

    fn controller() -> TransportController<RecordingMedia> {
        TransportController::new(RecordingMedia::new(), PlaybackConfig::default())
    }

    fn report(controller: &mut TransportController<RecordingMedia>, event: MediaEvent) {
        let load = controller.current_load();
        controller.on_media_event(MediaStatus::new(load, event));
    }

    #[test]
    fn new_controller_is_idle() {
        let controller = controller();
        assert_eq!(controller.phase(), TransportPhase::Idle);
        assert_eq!(controller.volume(), 0.8);
        assert_eq!(controller.media().volume(), 0.8);
        assert!(controller.queue().is_empty());
    }

    #[test]
    fn play_with_nothing_is_empty_source() {
        let mut controller = controller();
        assert_eq!(controller.play(&[]), Err(PlaybackError::EmptySource));
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn play_falls_back_to_context() {
        let mut controller = controller();
        let context = vec![create_test_track("a"), create_test_track("b")];

        controller.play(&context).unwrap();

        assert_eq!(controller.current_track().unwrap().id, "a");
        assert_eq!(controller.queue().len(), 1);
        assert_eq!(controller.media().active_source(), Some("a.mp3"));
    }

    #[test]
    fn load_track_issues_load_then_play() {
        let mut controller = controller();
        controller.media_mut().take_commands();

        controller.load_track(create_test_track("a"));

        assert_eq!(
            controller.media().commands(),
            &[
                MediaCommand::Load {
                    load: LoadId::new(1),
                    source: "a.mp3".to_string()
                },
                MediaCommand::Play
            ]
        );
        let events = controller.drain_events();
        assert!(matches!(events.as_slice(), [TransportEvent::TrackLoaded { .. }]));
    }

    #[test]
    fn reloading_queued_track_moves_pointer() {
        let mut controller = controller();
        controller.load_track(create_test_track("a"));
        controller.load_track(create_test_track("b"));
        controller.load_track(create_test_track("a"));

        assert_eq!(controller.queue().len(), 2);
        assert_eq!(controller.queue().current_index(), Some(0));
    }

    #[test]
    fn playing_only_changes_on_media_reports() {
        let mut controller = controller();
        controller.load_track(create_test_track("a"));
        assert!(!controller.is_playing());
        assert_eq!(controller.phase(), TransportPhase::LoadedPaused);

        report(&mut controller, MediaEvent::Play);
        assert_eq!(controller.phase(), TransportPhase::LoadedPlaying);
    }

    #[test]
    fn pause_only_from_playing() {
        let mut controller = controller();
        controller.load_track(create_test_track("a"));
        controller.media_mut().take_commands();

        controller.pause();
        assert!(controller.media().commands().is_empty());

        report(&mut controller, MediaEvent::Play);
        controller.pause();
        assert_eq!(controller.media().commands(), &[MediaCommand::Pause]);
    }

    #[test]
    fn toggle_play_pauses_when_playing() {
        let mut controller = controller();
        controller.load_track(create_test_track("a"));
        report(&mut controller, MediaEvent::Play);
        controller.media_mut().take_commands();

        controller.toggle_play(&[]).unwrap();
        assert_eq!(controller.media().commands(), &[MediaCommand::Pause]);

        report(&mut controller, MediaEvent::Pause);
        controller.toggle_play(&[]).unwrap();
        assert_eq!(controller.media().commands().last(), Some(&MediaCommand::Play));
    }

    #[test]
    fn stale_events_are_ignored() {
        let mut controller = controller();
        controller.load_track(create_test_track("a"));
        let old = controller.current_load();
        controller.load_track(create_test_track("b"));
        controller.drain_events();

        controller.on_media_event(MediaStatus::new(old, MediaEvent::Ended));
        controller.on_media_event(MediaStatus::new(old, MediaEvent::TimeUpdate { position: 12.0 }));

        assert_eq!(controller.current_track().unwrap().id, "b");
        assert_eq!(controller.position(), 0.0);
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn non_finite_duration_is_unknown() {
        let mut controller = controller();
        controller.load_track(create_test_track("a"));

        report(&mut controller, MediaEvent::MetadataLoaded { duration: f64::NAN });
        assert_eq!(controller.duration(), None);

        report(&mut controller, MediaEvent::MetadataLoaded { duration: 200.0 });
        assert_eq!(controller.duration(), Some(200.0));
    }

    #[test]
    fn seek_scales_by_duration() {
        let mut controller = controller();
        controller.load_track(create_test_track("a"));

        controller.seek(0.5);
        assert_eq!(controller.position(), 0.0);

        report(&mut controller, MediaEvent::MetadataLoaded { duration: 200.0 });
        controller.media_mut().take_commands();
        controller.seek(0.25);

        assert_eq!(controller.position(), 50.0);
        assert_eq!(controller.media().commands(), &[MediaCommand::Seek(50.0)]);
    }

    #[test]
    fn jump_out_of_range() {
        let mut controller = controller();
        controller.load_track(create_test_track("a"));
        assert_eq!(
            controller.jump(3),
            Err(PlaybackError::OutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn advance_on_empty_queue() {
        let mut controller = controller();
        assert_eq!(
            controller.advance(Direction::Next),
            Err(PlaybackError::EmptySource)
        );
        assert_eq!(
            controller.advance(Direction::Previous),
            Err(PlaybackError::EmptySource)
        );
    }

    #[test]
    fn nan_volume_is_ignored() {
        let mut controller = controller();
        controller.set_volume(0.5);
        controller.drain_events();

        controller.set_volume(f32::NAN);

        assert_eq!(controller.volume(), 0.5);
        assert!(!controller.has_pending_events());
    }

    #[test]
    fn mute_restores_default_when_unmuting_from_zero_start() {
        let mut controller =
            TransportController::new(RecordingMedia::new(), PlaybackConfig {
                volume: 0.0,
                ..PlaybackConfig::default()
            });
        assert!(controller.is_muted());

        controller.toggle_mute();

        assert!(!controller.is_muted());
        assert_eq!(controller.media().volume(), 0.8);
    }
}

//! Transport controller scenarios
//!
//! Drives the controller the way a host does: commands in, media status
//! reports back, events drained after each step.

use flow_core::{MediaEvent, MediaResource, MediaStatus, RepeatMode, Track};
use flow_playback::{
    Direction, MediaCommand, PlaybackConfig, RecordingMedia, TransportController, TransportEvent,
    TransportPhase,
};

// ===== Helpers =====

fn create_test_track(id: &str) -> Track {
    Track::new(id, format!("Track {}", id), "Test Artist").with_source(format!("/audio/{}.mp3", id))
}

fn controller_with(config: PlaybackConfig) -> TransportController<RecordingMedia> {
    TransportController::new(RecordingMedia::new(), config)
}

/// Queue A, B, C with C loaded and playing
fn at_last_of_three(repeat: RepeatMode) -> TransportController<RecordingMedia> {
    let mut controller = controller_with(PlaybackConfig {
        repeat,
        ..PlaybackConfig::default()
    });
    for id in ["A", "B", "C"] {
        controller.load_track(create_test_track(id));
    }
    report(&mut controller, MediaEvent::Play);
    controller.drain_events();
    controller.media_mut().take_commands();
    controller
}

fn report(controller: &mut TransportController<RecordingMedia>, event: MediaEvent) {
    let load = controller.current_load();
    controller.on_media_event(MediaStatus::new(load, event));
}

// ===== Queue End =====

#[test]
fn wrap_without_repeat_all_rests_on_first_without_loading() {
    let mut controller = at_last_of_three(RepeatMode::None);

    controller.advance(Direction::Next).unwrap();

    assert_eq!(controller.queue().current_index(), Some(0));
    assert!(controller.media().commands().is_empty(), "no load, no play");
    assert_eq!(controller.current_track().unwrap().id, "C");

    let events = controller.drain_events();
    assert_eq!(
        events,
        vec![TransportEvent::QueueChanged {
            index: Some(0),
            length: 3
        }]
    );
}

#[test]
fn wrap_with_repeat_all_plays_first() {
    let mut controller = at_last_of_three(RepeatMode::All);

    controller.advance(Direction::Next).unwrap();

    assert_eq!(controller.queue().current_index(), Some(0));
    assert_eq!(controller.current_track().unwrap().id, "A");
    assert_eq!(controller.media().active_source(), Some("/audio/A.mp3"));
    assert_eq!(controller.media().commands().last(), Some(&MediaCommand::Play));
}

#[test]
fn ended_on_last_track_without_repeat_stays_stopped() {
    let mut controller = at_last_of_three(RepeatMode::None);

    report(&mut controller, MediaEvent::Ended);

    assert!(!controller.is_playing());
    assert_eq!(controller.phase(), TransportPhase::LoadedPaused);
    assert_eq!(controller.queue().current_index(), Some(2));
    assert!(controller.media().commands().is_empty());
}

#[test]
fn ended_on_last_track_with_repeat_all_wraps() {
    let mut controller = at_last_of_three(RepeatMode::All);

    report(&mut controller, MediaEvent::Ended);

    assert_eq!(controller.current_track().unwrap().id, "A");
    assert_eq!(controller.queue().current_index(), Some(0));
}

#[test]
fn ended_mid_queue_advances() {
    let mut controller = controller_with(PlaybackConfig::default());
    controller.load_track(create_test_track("A"));
    controller.load_track(create_test_track("B"));
    controller.jump(0).unwrap();

    report(&mut controller, MediaEvent::Ended);

    assert_eq!(controller.current_track().unwrap().id, "B");
}

// ===== Repeat One =====

#[test]
fn repeat_one_restarts_in_place() {
    let mut controller = at_last_of_three(RepeatMode::One);
    report(&mut controller, MediaEvent::TimeUpdate { position: 180.0 });
    controller.media_mut().take_commands();
    let load_before = controller.current_load();

    report(&mut controller, MediaEvent::Ended);

    assert_eq!(controller.position(), 0.0);
    assert_eq!(controller.queue().current_index(), Some(2));
    assert_eq!(controller.current_load(), load_before);
    assert_eq!(
        controller.media().commands(),
        &[MediaCommand::Seek(0.0), MediaCommand::Play]
    );
}

// ===== Navigation =====

#[test]
fn previous_from_first_wraps_to_last_and_loads() {
    let mut controller = at_last_of_three(RepeatMode::None);
    controller.jump(0).unwrap();

    controller.advance(Direction::Previous).unwrap();

    assert_eq!(controller.current_track().unwrap().id, "C");
}

#[test]
fn shuffle_next_always_loads() {
    let mut controller = at_last_of_three(RepeatMode::None);
    controller.toggle_shuffle();
    controller.media_mut().take_commands();

    controller.advance(Direction::Next).unwrap();

    assert!(matches!(
        controller.media().commands().first(),
        Some(MediaCommand::Load { .. })
    ));
    let ids: Vec<_> = controller.queue().tracks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["A", "B", "C"]);
}

#[test]
fn play_resumes_loaded_track_without_reloading() {
    let mut controller = at_last_of_three(RepeatMode::None);
    report(&mut controller, MediaEvent::Pause);
    let load = controller.current_load();

    controller.play(&[create_test_track("Z")]).unwrap();

    assert_eq!(controller.current_load(), load);
    assert_eq!(controller.media().commands(), &[MediaCommand::Play]);
}

#[test]
fn play_after_wrap_resumes_loaded_track() {
    let mut controller = at_last_of_three(RepeatMode::None);
    controller.advance(Direction::Next).unwrap();
    assert_eq!(controller.queue().current_index(), Some(0));

    // Still holding C; play resumes it rather than loading A
    controller.play(&[]).unwrap();
    assert_eq!(controller.current_track().unwrap().id, "C");

    controller.jump(0).unwrap();
    assert_eq!(controller.current_track().unwrap().id, "A");
}

// ===== Volume =====

#[test]
fn mute_then_unmute_restores_set_volume() {
    let mut controller = controller_with(PlaybackConfig::default());

    controller.set_volume(0.3);
    controller.toggle_mute();
    assert!(controller.is_muted());
    assert_eq!(controller.media().volume(), 0.0);

    controller.toggle_mute();
    assert!(!controller.is_muted());
    assert_eq!(controller.media().volume(), 0.3);
    assert_eq!(controller.volume(), 0.3);
}

#[test]
fn set_volume_emits_for_persistence_but_mute_does_not() {
    let mut controller = controller_with(PlaybackConfig::default());

    controller.set_volume(0.5);
    controller.toggle_mute();

    let persisted: Vec<_> = controller
        .drain_events()
        .into_iter()
        .filter(TransportEvent::needs_persist)
        .collect();
    assert_eq!(persisted, vec![TransportEvent::VolumeChanged { volume: 0.5 }]);
}

// ===== Stale Media Reports =====

#[test]
fn ended_from_previous_load_does_not_skip() {
    let mut controller = controller_with(PlaybackConfig::default());
    controller.load_track(create_test_track("A"));
    let stale = controller.current_load();
    controller.load_track(create_test_track("B"));
    controller.load_track(create_test_track("C"));
    controller.jump(1).unwrap();

    controller.on_media_event(MediaStatus::new(stale, MediaEvent::Ended));

    assert_eq!(controller.current_track().unwrap().id, "B");
}

#[test]
fn snapshot_reflects_all_surfaces() {
    let mut controller = at_last_of_three(RepeatMode::All);
    report(&mut controller, MediaEvent::MetadataLoaded { duration: 200.0 });
    report(&mut controller, MediaEvent::TimeUpdate { position: 50.0 });

    let snapshot = controller.snapshot();

    assert_eq!(snapshot.phase, TransportPhase::LoadedPlaying);
    assert_eq!(snapshot.queue_index, Some(2));
    assert_eq!(snapshot.queue_len, 3);
    assert_eq!(snapshot.repeat, RepeatMode::All);
    assert_eq!(snapshot.progress(), 0.25);
}

//! Property-based tests for the queue and transport controller
//!
//! Uses proptest to verify invariants across many random inputs.

use flow_core::{RepeatMode, Track};
use flow_playback::{PlaybackConfig, Queue, RecordingMedia, TransportController};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    ("[a-z0-9]{1,6}", "[A-Za-z ]{1,30}", "[A-Za-z ]{1,20}")
        .prop_map(|(id, title, artist)| Track::new(id, title, artist))
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..40)
}

fn arbitrary_repeat() -> impl Strategy<Value = RepeatMode> {
    prop_oneof![
        Just(RepeatMode::None),
        Just(RepeatMode::One),
        Just(RepeatMode::All),
    ]
}

fn queue_from(tracks: &[Track]) -> Queue {
    let mut queue = Queue::new();
    for track in tracks {
        queue.append(track.clone());
    }
    queue
}

// ===== Property Tests =====

proptest! {
    /// Property: without shuffle, next stays in bounds and wraps only from the last entry
    #[test]
    fn next_index_in_bounds_and_wraps_only_at_end(
        tracks in arbitrary_tracks(),
        position in any::<prop::sample::Index>(),
    ) {
        let mut queue = queue_from(&tracks);
        let len = queue.len();
        let current = position.index(len);
        queue.set_current(current).unwrap();

        let next = queue.next_index(false).unwrap();

        prop_assert!(next.index < len);
        prop_assert_eq!(next.index == 0 && next.wrapped, current == len - 1);
        prop_assert_eq!(next.wrapped, current == len - 1);
    }

    /// Property: shuffle picks stay in bounds
    #[test]
    fn shuffle_next_index_in_bounds(
        tracks in arbitrary_tracks(),
        position in any::<prop::sample::Index>(),
    ) {
        let mut queue = queue_from(&tracks);
        let len = queue.len();
        queue.set_current(position.index(len)).unwrap();

        for _ in 0..20 {
            let next = queue.next_index(true).unwrap();
            prop_assert!(next.index < len);
        }
    }

    /// Property: queue never holds two tracks with the same id
    #[test]
    fn append_keeps_ids_unique(tracks in arbitrary_tracks()) {
        let queue = queue_from(&tracks);

        let distinct: HashSet<_> = tracks.iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(queue.len(), distinct.len());

        let queued: HashSet<_> = queue.tracks().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(queued.len(), queue.len());
    }

    /// Property: appending an already queued id leaves the queue unchanged
    #[test]
    fn duplicate_append_preserves_length(
        tracks in arbitrary_tracks(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut queue = queue_from(&tracks);
        let before: Vec<_> = queue.tracks().iter().map(|t| t.id.clone()).collect();

        let duplicate = tracks[pick.index(tracks.len())].clone();
        queue.append(duplicate);

        let after: Vec<_> = queue.tracks().iter().map(|t| t.id.clone()).collect();
        prop_assert_eq!(before, after);
    }

    /// Property: previous always lands inside the queue
    #[test]
    fn previous_index_in_bounds(
        tracks in arbitrary_tracks(),
        position in any::<prop::sample::Index>(),
    ) {
        let mut queue = queue_from(&tracks);
        let len = queue.len();
        let current = position.index(len);
        queue.set_current(current).unwrap();

        let previous = queue.previous_index().unwrap();
        prop_assert!(previous < len);
        if current > 0 {
            prop_assert_eq!(previous, current - 1);
        } else {
            prop_assert_eq!(previous, len - 1);
        }
    }

    /// Property: three repeat cycles restore the starting mode
    #[test]
    fn cycle_repeat_three_times_is_identity(start in arbitrary_repeat()) {
        let config = PlaybackConfig { repeat: start, ..PlaybackConfig::default() };
        let mut controller = TransportController::new(RecordingMedia::new(), config);

        controller.cycle_repeat();
        controller.cycle_repeat();
        controller.cycle_repeat();

        prop_assert_eq!(controller.repeat(), start);
    }

    /// Property: volume setting always stays in range
    #[test]
    fn volume_always_clamped(volume in prop::num::f32::ANY) {
        let mut controller = TransportController::new(RecordingMedia::new(), PlaybackConfig::default());
        controller.set_volume(volume);

        let level = controller.volume();
        prop_assert!((0.0..=1.0).contains(&level));
    }

    /// Property: the queue pointer stays valid through any sequence of loads and skips
    #[test]
    fn queue_pointer_stays_valid(
        tracks in arbitrary_tracks(),
        steps in prop::collection::vec(0u8..3, 0..30),
    ) {
        let mut controller = TransportController::new(RecordingMedia::new(), PlaybackConfig::default());
        for track in &tracks {
            controller.load_track(track.clone());
        }

        for step in steps {
            let _ = match step {
                0 => controller.advance(flow_playback::Direction::Next),
                1 => controller.advance(flow_playback::Direction::Previous),
                _ => { controller.toggle_shuffle(); Ok(()) }
            };

            let queue = controller.queue();
            let index = queue.current_index().unwrap();
            prop_assert!(index < queue.len());
        }
    }
}

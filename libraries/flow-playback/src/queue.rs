//! Playback queue
//!
//! Ordered, duplicate-free list of tracks with a current-position pointer.
//! Shuffle never reorders the stored queue; it only changes which index
//! [`Queue::next_index`] picks.

use crate::error::{PlaybackError, Result};
use flow_core::{Track, TrackId};
use rand::Rng;

/// Result of asking the queue for the next position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextIndex {
    /// Index to move to
    pub index: usize,

    /// True when the queue was exhausted and the index wrapped to the start
    pub wrapped: bool,
}

/// Playback queue
///
/// Structure:
/// ```text
/// [0] Track A   ─┐
/// [1] Track B    ├─ recently played (most recent first in the queue panel)
/// [2] Track C  ◄─┘  current
/// [3] Track D   ─┐
/// [4] Track E   ─┴─ upcoming
/// ```
///
/// Invariant: `current < tracks.len()` whenever the queue is non-empty.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Tracks in insertion order, unique by id
    tracks: Vec<Track>,

    /// Current position (meaningless while empty)
    current: usize,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track unless one with the same id is already queued
    ///
    /// Existing entries are never moved. Returns the index the track lives at.
    pub fn append(&mut self, track: Track) -> usize {
        if let Some(index) = self.position_of(&track.id) {
            return index;
        }

        self.tracks.push(track);
        self.tracks.len() - 1
    }

    /// Point the queue at `index`
    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::OutOfRange {
                index,
                len: self.tracks.len(),
            });
        }

        self.current = index;
        Ok(())
    }

    /// Current position, `None` while empty
    pub fn current_index(&self) -> Option<usize> {
        (!self.tracks.is_empty()).then_some(self.current)
    }

    /// Track at the current position
    pub fn current(&self) -> Option<&Track> {
        self.current_index().and_then(|index| self.tracks.get(index))
    }

    /// Whether the current position is the final entry
    pub fn is_at_end(&self) -> bool {
        self.current_index()
            .is_some_and(|index| index + 1 == self.tracks.len())
    }

    /// Index for "previous"
    ///
    /// Steps back by one; from the first entry it wraps to the last.
    pub fn previous_index(&self) -> Option<usize> {
        let current = self.current_index()?;
        if current > 0 {
            Some(current - 1)
        } else {
            Some(self.tracks.len() - 1)
        }
    }

    /// Index for "next"
    ///
    /// With `shuffle`, any index (including the current one) is equally likely.
    /// Otherwise steps forward by one and wraps to 0 past the end. Whether a
    /// wrap should keep playing is the caller's decision.
    pub fn next_index(&self, shuffle: bool) -> Option<NextIndex> {
        self.next_index_with(shuffle, &mut rand::thread_rng())
    }

    /// [`next_index`](Self::next_index) with an explicit random source
    pub fn next_index_with<R: Rng + ?Sized>(&self, shuffle: bool, rng: &mut R) -> Option<NextIndex> {
        let current = self.current_index()?;
        let len = self.tracks.len();

        if shuffle {
            return Some(NextIndex {
                index: rng.gen_range(0..len),
                wrapped: false,
            });
        }

        if current + 1 < len {
            Some(NextIndex {
                index: current + 1,
                wrapped: false,
            })
        } else {
            Some(NextIndex {
                index: 0,
                wrapped: true,
            })
        }
    }

    /// Position of the track with `id`
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Find a queued track by id
    pub fn find(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Tracks after the current position
    pub fn upcoming(&self) -> &[Track] {
        match self.current_index() {
            Some(index) => &self.tracks[index + 1..],
            None => &[],
        }
    }

    /// Tracks up to and including the current position, most recent first
    pub fn recently_played(&self) -> Vec<&Track> {
        match self.current_index() {
            Some(index) => self.tracks[..=index].iter().rev().collect(),
            None => Vec::new(),
        }
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = 0;
    }
}

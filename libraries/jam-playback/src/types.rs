//! Core types for playback management

use jam_core::types::Track;
use serde::{Deserialize, Serialize};

/// Transport state of the single player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No track bound to the output
    Empty,

    /// Source requested, playback not confirmed yet
    Loading,

    /// Currently playing
    Playing,

    /// Track bound, not playing (user pause, natural end, or failed start)
    Paused,
}

/// Load generation of the audio output.
///
/// Every source load takes a new epoch. Output callbacks carry the epoch they
/// were issued under and are dropped once it is no longer current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch(u64);

impl Epoch {
    /// Raw generation number
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Point-in-time copy of the playback session.
///
/// This is what surfaces render from; they never keep their own copy of
/// transport state.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSnapshot {
    /// Track bound to the output, if any
    pub current_track: Option<Track>,

    /// Transport state
    pub state: TransportState,

    /// Position in seconds, always within `0..=duration`
    pub current_time: f64,

    /// Source length in seconds, 0 until metadata arrives
    pub duration: f64,

    /// Output level in `0.0..=1.0`
    pub volume: f32,

    /// Whether output is muted (level preserved)
    pub muted: bool,
}

impl TransportSnapshot {
    /// Whether audio is currently playing
    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    /// Whether `track_id` is the track bound to the output
    pub fn is_current(&self, track_id: &jam_core::TrackId) -> bool {
        self.current_track
            .as_ref()
            .is_some_and(|track| &track.id == track_id)
    }

    /// Progress through the track in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Locally cached social counters for one track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Number of likes, including optimistic local changes
    pub like_count: u64,

    /// Number of plays, including at most one optimistic local increment
    pub play_count: u64,

    /// Whether the current user likes the track
    pub user_liked: bool,

    /// Whether this process already counted a play for the track
    pub has_played: bool,
}

impl InteractionRecord {
    /// Whether the record still holds nothing but zero values.
    ///
    /// Any local change counts, including the optimistic play increment, so
    /// a play counted before the server baseline arrived blocks seeding.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Configuration for the playback engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Start muted (default: false)
    pub muted: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
        }
    }
}

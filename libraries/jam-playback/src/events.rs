//! Playback Events
//!
//! Event-based communication for UI synchronization. Surfaces re-read the
//! shared state when they see an event that concerns them:
//! - State changes (loading/playing/paused/empty)
//! - Track changes
//! - Position and volume updates
//! - Interaction counter changes for a track id

use crate::types::TransportState;
use jam_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback engine and the interaction store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// A different track was bound to the output
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Position or duration changed
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration
        duration_ms: u64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Like/play counters of a track changed
    InteractionChanged {
        /// Track whose record changed
        track_id: TrackId,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Track this event is about, if it is about one
    pub fn track_id(&self) -> Option<&TrackId> {
        match self {
            PlaybackEvent::TrackChanged { track_id, .. }
            | PlaybackEvent::TrackFinished { track_id }
            | PlaybackEvent::InteractionChanged { track_id } => Some(track_id),
            _ => None,
        }
    }
}

pub(crate) fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}

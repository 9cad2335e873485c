use serde::{Deserialize, Serialize};

/// Server-provided social counters for one track.
///
/// Used to seed the player's shared interaction record the first time a
/// surface shows the track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSnapshot {
    /// Number of likes
    pub like_count: u64,

    /// Number of plays
    pub play_count: u64,

    /// Whether the requesting user liked the track
    pub user_liked: bool,
}

impl InteractionSnapshot {
    /// Create a snapshot from raw counters
    pub fn new(like_count: u64, play_count: u64, user_liked: bool) -> Self {
        Self {
            like_count,
            play_count,
            user_liked,
        }
    }
}

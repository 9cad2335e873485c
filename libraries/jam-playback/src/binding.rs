//! Per-surface adapter between a rendered track and the shared player
//!
//! A feed card, the detail page and the footer each hold a [`TrackBinding`]
//! for the track they render. Bindings keep no transport state or counters
//! of their own: everything they show is read back from the context, so two
//! surfaces showing the same track can never disagree about which one is
//! playing.

use crate::context::PlayerContext;
use jam_core::types::{Track, TrackId};

/// Everything a surface needs to render one track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackView {
    /// Track rendered by the surface
    pub track_id: TrackId,

    /// Whether this track is bound to the player
    pub is_current: bool,

    /// Whether this track is audibly playing
    pub is_playing: bool,

    /// Position in seconds (0 unless current)
    pub current_time: f64,

    /// Length in seconds (0 unless current and loaded)
    pub duration: f64,

    /// Like count including local changes
    pub like_count: u64,

    /// Play count including the local first play
    pub play_count: u64,

    /// Whether the user likes the track
    pub user_liked: bool,
}

/// A mounted surface rendering one track
#[derive(Clone)]
pub struct TrackBinding {
    context: PlayerContext,
    track: Track,
}

impl TrackBinding {
    /// Mount a surface for `track`, seeding the shared counters from the
    /// snapshot it was fetched with.
    pub fn mount(context: &PlayerContext, track: Track) -> Self {
        context.seed(&track.id, track.interaction_snapshot());
        Self {
            context: context.clone(),
            track,
        }
    }

    /// Track snapshot this surface was mounted with
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Current render state
    pub fn view(&self) -> TrackView {
        let transport = self.context.transport();
        let is_current = transport.is_current(&self.track.id);
        let record = self.context.interaction(&self.track.id);

        TrackView {
            track_id: self.track.id.clone(),
            is_current,
            is_playing: is_current && transport.is_playing(),
            current_time: if is_current { transport.current_time } else { 0.0 },
            duration: if is_current { transport.duration } else { 0.0 },
            like_count: record.like_count,
            play_count: record.play_count,
            user_liked: record.user_liked,
        }
    }

    /// Play/pause button: toggles the player and counts the first play.
    pub fn toggle_play(&self) -> TrackView {
        self.context.toggle_play_pause(&self.track);
        self.context.increment_play(&self.track.id);
        self.view()
    }

    /// Like button
    pub fn toggle_like(&self) -> TrackView {
        self.context.toggle_like(&self.track.id);
        self.view()
    }

    /// Progress bar drag. Ignored unless this track is current.
    pub fn seek(&self, position: f64) -> bool {
        if !self.context.transport().is_current(&self.track.id) {
            return false;
        }
        self.context.update_time(position);
        true
    }
}

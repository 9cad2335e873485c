//! Shared like/play counters
//!
//! One [`InteractionRecord`] per track id, shared by every surface that
//! shows the track, so a like in the feed shows up in the sidebar at once.
//! Records are created lazily and live as long as the store.

use crate::{
    events::PlaybackEvent,
    remote::{RemoteQueue, RemoteRequest},
    types::InteractionRecord,
};
use jam_core::types::{InteractionSnapshot, TrackId};
use std::collections::HashMap;
use tracing::debug;

/// Keyed table of interaction records
pub struct InteractionStore {
    records: HashMap<TrackId, InteractionRecord>,
    remote: RemoteQueue,
    pending_events: Vec<PlaybackEvent>,
}

impl InteractionStore {
    /// Create an empty store reporting likes through `remote`
    pub fn new(remote: RemoteQueue) -> Self {
        Self {
            records: HashMap::new(),
            remote,
            pending_events: Vec::new(),
        }
    }

    /// Current record for `track_id`, creating a zero record if absent
    pub fn get_interaction(&mut self, track_id: &TrackId) -> InteractionRecord {
        *self.record_mut(track_id)
    }

    /// Record for `track_id` without creating one
    pub fn peek(&self, track_id: &TrackId) -> Option<InteractionRecord> {
        self.records.get(track_id).copied()
    }

    /// Set the server baseline for `track_id`.
    ///
    /// Only applies while the record is absent or still all zeros, so a
    /// surface mounting later with an older snapshot cannot undo a local
    /// change. Returns whether the baseline was applied.
    pub fn seed(&mut self, track_id: &TrackId, snapshot: InteractionSnapshot) -> bool {
        let record = self.record_mut(track_id);
        if !record.is_default() {
            return false;
        }

        let seeded = InteractionRecord {
            like_count: snapshot.like_count,
            play_count: snapshot.play_count,
            user_liked: snapshot.user_liked,
            has_played: false,
        };
        if seeded == *record {
            return false;
        }

        *record = seeded;
        debug!(
            track_id = %track_id,
            likes = snapshot.like_count,
            plays = snapshot.play_count,
            "Seeded interaction record"
        );
        self.emit_changed(track_id);
        true
    }

    /// Flip the user's like and adjust the count, then report it.
    ///
    /// The local change is kept even if the report fails.
    pub fn toggle_like(&mut self, track_id: &TrackId) -> InteractionRecord {
        let record = self.record_mut(track_id);
        if record.user_liked {
            record.user_liked = false;
            record.like_count = record.like_count.saturating_sub(1);
        } else {
            record.user_liked = true;
            record.like_count += 1;
        }
        let updated = *record;

        self.remote.submit(RemoteRequest::ToggleLike {
            track_id: track_id.clone(),
            liked: updated.user_liked,
        });
        self.emit_changed(track_id);
        updated
    }

    /// Count the first play of `track_id`; later calls are no-ops.
    ///
    /// Returns whether a play was counted.
    pub fn increment_play(&mut self, track_id: &TrackId) -> bool {
        let record = self.record_mut(track_id);
        if record.has_played {
            return false;
        }

        record.play_count += 1;
        record.has_played = true;
        self.emit_changed(track_id);
        true
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record exists yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn record_mut(&mut self, track_id: &TrackId) -> &mut InteractionRecord {
        self.records.entry(track_id.clone()).or_default()
    }

    fn emit_changed(&mut self, track_id: &TrackId) {
        self.pending_events.push(PlaybackEvent::InteractionChanged {
            track_id: track_id.clone(),
        });
    }
}

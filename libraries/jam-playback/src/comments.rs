//! Per-track comment cache shared by surfaces

use jam_core::types::{Comment, CommentId, TrackId};
use std::collections::HashMap;

/// Comments known locally for each track, newest first
#[derive(Debug, Default)]
pub struct CommentStore {
    comments: HashMap<TrackId, Vec<Comment>>,
}

impl CommentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Comments for `track_id` (empty if none are known)
    pub fn comments(&self, track_id: &TrackId) -> &[Comment] {
        self.comments
            .get(track_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replace the comments of `track_id` with a fetched list
    pub fn replace(&mut self, track_id: &TrackId, comments: Vec<Comment>) {
        self.comments.insert(track_id.clone(), comments);
    }

    /// Prepend `comment`. Returns false if a comment with the same id is
    /// already present.
    pub fn add(&mut self, track_id: &TrackId, comment: Comment) -> bool {
        let list = self.comments.entry(track_id.clone()).or_default();
        if list.iter().any(|existing| existing.id == comment.id) {
            return false;
        }
        list.insert(0, comment);
        true
    }

    /// Remove one comment. Returns whether it was present.
    pub fn remove(&mut self, track_id: &TrackId, comment_id: &CommentId) -> bool {
        let Some(list) = self.comments.get_mut(track_id) else {
            return false;
        };
        let before = list.len();
        list.retain(|comment| &comment.id != comment_id);
        list.len() != before
    }

    /// Forget every comment of `track_id`
    pub fn clear(&mut self, track_id: &TrackId) {
        self.comments.remove(track_id);
    }
}

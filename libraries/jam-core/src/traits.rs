/// Core traits for Jam Player
use crate::error::Result;
use crate::types::{Comment, CommentId, Track, TrackId, TrackPage, UserCommentPage, UserId};
use async_trait::async_trait;

/// Backend collaborator for social interactions and track snapshots.
///
/// Implementations perform one request per call and never retry. The
/// playback core only ever calls `report_play` and `toggle_like` from a
/// background dispatcher, so their failures are logged rather than surfaced.
#[async_trait]
pub trait RemoteTrackService: Send + Sync {
    /// Record one play of `track_id` for the current user.
    async fn report_play(&self, track_id: &TrackId) -> Result<()>;

    /// Flip the current user's like on `track_id`.
    ///
    /// The backend toggles; it does not take the desired state.
    async fn toggle_like(&self, track_id: &TrackId) -> Result<()>;

    /// Post a comment and return it as stored by the backend.
    async fn post_comment(&self, track_id: &TrackId, text: &str) -> Result<Comment>;

    /// Delete one of the current user's comments.
    async fn delete_comment(&self, track_id: &TrackId, comment_id: &CommentId) -> Result<()>;

    /// Fetch a single track snapshot.
    async fn fetch_track(&self, track_id: &TrackId) -> Result<Track>;

    /// Fetch one page of the tracks uploaded by `user_id`.
    ///
    /// Pages are 1-based.
    async fn fetch_user_tracks(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> Result<TrackPage>;

    /// Fetch one page of the tracks `user_id` played most recently.
    async fn fetch_recent_plays(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> Result<TrackPage>;

    /// Fetch one page of the tracks `user_id` liked most recently.
    async fn fetch_recent_likes(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> Result<TrackPage>;

    /// Fetch one page of the comments `user_id` left, newest first.
    async fn fetch_user_comments(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> Result<UserCommentPage>;
}

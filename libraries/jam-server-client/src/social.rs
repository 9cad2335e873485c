//! Plays, likes and comments.

use crate::error::Result;
use crate::response::{authorize, data, endpoint, fetch_page, send, user_listing};
use crate::types::{CommentRef, NewComment, PostedComment, SessionUser, TrackRef};
use chrono::Utc;
use jam_core::{Comment, CommentId, TrackId, UserCommentPage, UserId};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Social interaction client for the Jam API.
///
/// Every call is a single request; nothing is retried.
pub struct SocialClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    access_token: Option<&'a str>,
}

impl<'a> SocialClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Record one play of `track_id`.
    pub async fn report_play(&self, track_id: &TrackId) -> Result<()> {
        let url = endpoint(self.base_url, &["TrackPlay"])?;
        debug!(track_id = %track_id, "Reporting play");

        let request = self.http.post(url.clone()).json(&TrackRef { track_id });
        send(authorize(request, self.access_token), &url).await?;
        Ok(())
    }

    /// Flip the like of the signed-in user on `track_id`.
    pub async fn toggle_like(&self, track_id: &TrackId) -> Result<()> {
        let url = endpoint(self.base_url, &["TrackLike"])?;
        debug!(track_id = %track_id, "Toggling like");

        let request = self.http.put(url.clone()).json(&TrackRef { track_id });
        send(authorize(request, self.access_token), &url).await?;
        Ok(())
    }

    /// Post a comment.
    ///
    /// The backend only returns the new id; author fields are filled from
    /// `author` (left empty when signed out).
    pub async fn post_comment(
        &self,
        track_id: &TrackId,
        text: &str,
        author: Option<&SessionUser>,
    ) -> Result<Comment> {
        let url = endpoint(self.base_url, &["TrackComment"])?;
        debug!(track_id = %track_id, "Posting comment");

        let request = self.http.post(url.clone()).json(&NewComment {
            track_id,
            comment: text,
        });
        let response = send(authorize(request, self.access_token), &url).await?;
        let posted: PostedComment = data(response, "comment").await?;

        let author = author.cloned().unwrap_or_default();
        Ok(Comment {
            id: posted.id,
            text: text.to_string(),
            user_id: author.user_id,
            username: author.username,
            display_name: author.display_name,
            user_profile_picture_url: author.profile_picture_url,
            created_at: Utc::now(),
            user_profile_updated_at: author.profile_updated_at,
        })
    }

    /// Delete a comment of the signed-in user.
    pub async fn delete_comment(&self, track_id: &TrackId, comment_id: &CommentId) -> Result<()> {
        let url = endpoint(self.base_url, &["TrackComment"])?;
        debug!(track_id = %track_id, comment_id = %comment_id, "Deleting comment");

        let request = self.http.delete(url.clone()).json(&CommentRef {
            track_id,
            comment_id,
        });
        send(authorize(request, self.access_token), &url).await?;
        Ok(())
    }

    /// Get the comments `user_id` left, newest first.
    pub async fn get_user_comments(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> Result<UserCommentPage> {
        let url = user_listing(
            self.base_url,
            &["TrackComment", "byUser"],
            user_id,
            page_number,
            page_size,
        )?;
        debug!(url = %url, user_id = %user_id, "Fetching user comments");

        fetch_page(self.http, url, self.access_token, "comments").await
    }
}

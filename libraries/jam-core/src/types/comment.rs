/// Comment domain type
use crate::types::{CommentId, TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment left on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,

    /// Comment body
    pub text: String,

    /// Author identifier
    pub user_id: UserId,

    /// Author login name
    #[serde(default)]
    pub username: String,

    /// Author display name
    #[serde(default)]
    pub display_name: String,

    /// Author avatar
    #[serde(default)]
    pub user_profile_picture_url: Option<String>,

    /// When the comment was posted
    pub created_at: DateTime<Utc>,

    /// Last profile update of the author (used to bust avatar caches)
    #[serde(default)]
    pub user_profile_updated_at: Option<DateTime<Utc>>,
}

/// A comment as listed on its author's profile, with the track it is on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserComment {
    /// Unique comment identifier
    pub id: CommentId,

    /// Comment body
    pub text: String,

    /// Author identifier
    pub user_id: UserId,

    /// Author login name
    #[serde(default)]
    pub username: String,

    /// Author display name
    #[serde(default)]
    pub display_name: String,

    /// When the comment was posted
    pub created_at: DateTime<Utc>,

    /// Commented track
    pub track_id: TrackId,

    /// Title of the commented track
    #[serde(default)]
    pub track_name: String,
}

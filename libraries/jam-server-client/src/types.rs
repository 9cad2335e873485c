//! Types for Jam API requests and responses.

use chrono::{DateTime, Utc};
use jam_core::{CommentId, Page, Track, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// Default API root of a local backend
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1";

/// Configuration for connecting to the Jam API.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// API root (e.g., "https://jam.example.com/api/v1")
    pub url: String,
    /// Bearer token of the signed-in user, if any
    pub access_token: Option<String>,
    /// Profile of the signed-in user, used to complete posted comments
    pub user: Option<SessionUser>,
}

impl ServerConfig {
    /// Create an anonymous config for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            user: None,
        }
    }

    /// Create a config carrying an access token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
            user: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Signed-in user as known to the front-end
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: UserId,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub profile_updated_at: Option<DateTime<Utc>>,
}

/// Profile of the signed-in user, as served by `GET /profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<UserProfile> for SessionUser {
    /// Profiles carry no login name; the display name stands in for it.
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.user_id,
            username: profile.display_name.clone(),
            display_name: profile.display_name,
            profile_picture_url: profile.profile_picture_url,
            profile_updated_at: profile.updated_at,
        }
    }
}

// =============================================================================
// Envelopes
// =============================================================================

/// Every response body wraps its payload in `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackData {
    pub track: Track,
}

/// Listings nest their page under `tracks`, comment listings included.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingData<T> {
    pub tracks: Page<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileData {
    pub user_profile: UserProfile,
}

/// The backend only echoes the id of a new comment.
#[derive(Debug, Deserialize)]
pub(crate) struct PostedComment {
    pub id: CommentId,
}

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackRef<'a> {
    pub track_id: &'a TrackId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewComment<'a> {
    pub track_id: &'a TrackId,
    pub comment: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentRef<'a> {
    pub track_id: &'a TrackId,
    pub comment_id: &'a CommentId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_bodies_use_camel_case() {
        let track_id = TrackId::new("t-1");
        let comment_id = CommentId::new("c-9");

        let body = serde_json::to_value(CommentRef {
            track_id: &track_id,
            comment_id: &comment_id,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"trackId": "t-1", "commentId": "c-9"}));
    }

    #[test]
    fn session_user_from_profile() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "userId": "u-9",
            "displayName": "Kordhell",
            "bio": "",
            "location": "Leeds",
            "profilePictureUrl": "https://cdn.example.com/u-9.jpg"
        }))
        .unwrap();

        let user = SessionUser::from(profile);

        assert_eq!(user.user_id, UserId::new("u-9"));
        assert_eq!(user.username, "Kordhell");
        assert_eq!(user.display_name, "Kordhell");
        assert_eq!(
            user.profile_picture_url.as_deref(),
            Some("https://cdn.example.com/u-9.jpg")
        );
        assert!(user.profile_updated_at.is_none());
    }

    #[test]
    fn default_config_targets_local_backend() {
        let config = ServerConfig::default();
        assert_eq!(config.url, DEFAULT_API_URL);
        assert!(config.access_token.is_none());
    }
}

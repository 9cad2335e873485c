/// Track domain type
use crate::types::{Comment, InteractionSnapshot, TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploaded audio track, as returned by the backend.
///
/// The player treats a `Track` as an immutable snapshot taken when it was
/// fetched. Live social counters are owned by the interaction store, not by
/// this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Audio source URL
    #[serde(rename = "audioFileUrl")]
    pub audio_url: String,

    /// Cover image URL
    #[serde(default)]
    pub image_url: Option<String>,

    /// Uploader identifier
    #[serde(rename = "userId")]
    pub owner_id: UserId,

    /// Uploader display name
    #[serde(rename = "username")]
    pub owner_name: String,

    /// Upload time
    pub created_at: DateTime<Utc>,

    /// Last edit time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Free-form tags ("phonk", "trap", ...)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Nominal duration as formatted by the backend ("3:05")
    #[serde(rename = "originalDuration", default)]
    pub duration: Option<String>,

    /// Denormalized like count at fetch time
    #[serde(default)]
    pub like_count: u64,

    /// Denormalized play count at fetch time
    #[serde(default)]
    pub play_count: u64,

    /// Whether the requesting user liked the track at fetch time
    #[serde(rename = "userLikedTrack", default)]
    pub user_liked: bool,

    /// Comments embedded in the detail response (empty in listings)
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Track {
    /// Create a track with minimal metadata and zeroed counters
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        audio_url: impl Into<String>,
        owner_id: UserId,
        owner_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            audio_url: audio_url.into(),
            image_url: None,
            owner_id,
            owner_name: owner_name.into(),
            created_at: Utc::now(),
            updated_at: None,
            tags: Vec::new(),
            duration: None,
            like_count: 0,
            play_count: 0,
            user_liked: false,
            comments: Vec::new(),
        }
    }

    /// Counters carried by this snapshot
    pub fn interaction_snapshot(&self) -> InteractionSnapshot {
        InteractionSnapshot::new(self.like_count, self.play_count, self.user_liked)
    }

    /// Nominal duration in seconds, if the formatted duration parses
    pub fn duration_secs(&self) -> Option<u64> {
        self.duration.as_deref().and_then(parse_duration_secs)
    }

    /// Cover URL with a cache-busting query tied to the last edit.
    ///
    /// Covers are overwritten in place on edit, so the URL alone does not
    /// change when the image does.
    pub fn cover_url(&self) -> Option<String> {
        let base = self.image_url.as_deref()?;
        let version = self.updated_at.unwrap_or(self.created_at).timestamp();
        let separator = if base.contains('?') { '&' } else { '?' };
        Some(format!("{}{}t={}", base, separator, version))
    }
}

/// Parse "ss", "mm:ss" or "hh:mm:ss" into seconds.
pub fn parse_duration_secs(formatted: &str) -> Option<u64> {
    let parts: Vec<&str> = formatted.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut total: u64 = 0;
    for (i, part) in parts.iter().enumerate() {
        let value: u64 = part.trim().parse().ok()?;
        // Minutes and seconds after the leading unit must stay below 60
        if i > 0 && value >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
    }
    Some(total)
}

//! Track lookups.

use crate::error::Result;
use crate::response::{authorize, data, endpoint, fetch_page, paged, send, user_listing};
use crate::types::TrackData;
use jam_core::{Track, TrackId, TrackPage, UserId};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Track client for the Jam API.
pub struct TrackClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    access_token: Option<&'a str>,
}

impl<'a> TrackClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Get a single track, with its comments.
    pub async fn get_track(&self, track_id: &TrackId) -> Result<Track> {
        let url = endpoint(self.base_url, &["Track", track_id.as_str()])?;
        debug!(url = %url, track_id = %track_id, "Fetching track");

        let request = authorize(self.http.get(url.clone()), self.access_token);
        let response = send(request, &url).await?;
        let payload: TrackData = data(response, "track").await?;

        Ok(payload.track)
    }

    /// Get one page of the tracks uploaded by `user_id`.
    ///
    /// # Arguments
    /// * `page_number` - 1-based page
    /// * `page_size` - Tracks per page
    pub async fn get_user_tracks(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> Result<TrackPage> {
        let mut url = endpoint(self.base_url, &["Track", "byuser", user_id.as_str()])?;
        paged(&mut url, page_number, page_size);
        debug!(url = %url, user_id = %user_id, "Fetching user tracks");

        let page: TrackPage = fetch_page(self.http, url, self.access_token, "tracks").await?;

        debug!(
            tracks = page.items.len(),
            page = page.page_number,
            has_next_page = page.has_next_page,
            "Fetched user tracks"
        );

        Ok(page)
    }

    /// Get the tracks `user_id` played most recently.
    pub async fn get_recent_plays(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> Result<TrackPage> {
        let url = user_listing(
            self.base_url,
            &["TrackPlay", "byUser"],
            user_id,
            page_number,
            page_size,
        )?;
        debug!(url = %url, user_id = %user_id, "Fetching recent plays");

        fetch_page(self.http, url, self.access_token, "recent plays").await
    }

    /// Get the tracks `user_id` liked most recently.
    pub async fn get_recent_likes(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> Result<TrackPage> {
        let url = user_listing(
            self.base_url,
            &["TrackLike", "byUser"],
            user_id,
            page_number,
            page_size,
        )?;
        debug!(url = %url, user_id = %user_id, "Fetching recent likes");

        fetch_page(self.http, url, self.access_token, "recent likes").await
    }
}

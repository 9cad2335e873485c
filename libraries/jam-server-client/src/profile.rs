//! Profile of the signed-in user.

use crate::error::Result;
use crate::response::{authorize, data, endpoint, send};
use crate::types::{ProfileData, UserProfile};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Profile client for the Jam API.
pub struct ProfileClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    access_token: Option<&'a str>,
}

impl<'a> ProfileClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, access_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Get the profile belonging to the access token.
    pub async fn get_profile(&self) -> Result<UserProfile> {
        let url = endpoint(self.base_url, &["profile"])?;
        debug!(url = %url, "Fetching profile");

        let request = authorize(self.http.get(url.clone()), self.access_token);
        let response = send(request, &url).await?;
        let payload: ProfileData = data(response, "profile").await?;

        Ok(payload.user_profile)
    }
}

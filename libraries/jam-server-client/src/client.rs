//! Main Jam API client.

use crate::error::{Result, ServerClientError};
use crate::profile::ProfileClient;
use crate::social::SocialClient;
use crate::tracks::TrackClient;
use crate::types::{ServerConfig, SessionUser};
use async_trait::async_trait;
use jam_core::{
    Comment, CommentId, RemoteTrackService, Track, TrackId, TrackPage, UserCommentPage, UserId,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Default)]
struct Session {
    access_token: Option<String>,
    user: Option<SessionUser>,
}

/// Client for the Jam REST API.
///
/// Holds the API root and the current session (bearer token and user
/// profile). Implements [`RemoteTrackService`] so it can back a player
/// context directly.
///
/// # Example
///
/// ```ignore
/// use jam_server_client::{JamApiClient, ServerConfig};
///
/// let client = JamApiClient::new(ServerConfig::with_token(
///     "https://jam.example.com/api/v1",
///     "token",
/// ))?;
///
/// let page = client.tracks().await.get_user_tracks(&user_id, 1, 10).await?;
/// println!("Found {} tracks", page.items.len());
/// ```
pub struct JamApiClient {
    http: Client,
    base_url: Url,
    session: Arc<RwLock<Session>>,
}

impl JamApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        // Validate URL
        let trimmed = config.url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        let base_url =
            Url::parse(trimmed).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("JamPlayer/{} (cli)", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ServerClientError::Request)?;

        debug!(url = %base_url, "Created API client");

        Ok(Self {
            http,
            base_url,
            session: Arc::new(RwLock::new(Session {
                access_token: config.access_token,
                user: config.user,
            })),
        })
    }

    /// Get the API root, without trailing slash.
    pub fn url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Check if the client has an access token.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.access_token.is_some()
    }

    /// Set the session directly (e.g., from stored credentials).
    pub async fn set_session(&self, access_token: String, user: Option<SessionUser>) {
        let mut session = self.session.write().await;
        session.access_token = Some(access_token);
        session.user = user;
    }

    /// Profile of the signed-in user.
    pub async fn session_user(&self) -> Option<SessionUser> {
        self.session.read().await.user.clone()
    }

    /// Fetch the profile of the token holder and keep it as session user.
    ///
    /// Comments posted afterwards carry this user as their author.
    pub async fn load_session_user(&self) -> Result<SessionUser> {
        let handle = self.profile().await;
        let user = SessionUser::from(handle.client().get_profile().await?);

        self.session.write().await.user = Some(user.clone());
        info!(user_id = %user.user_id, "Loaded session user");
        Ok(user)
    }

    /// Clear the session (logout).
    pub async fn logout(&self) {
        let mut session = self.session.write().await;
        session.access_token = None;
        session.user = None;
        info!("Logged out");
    }

    /// Get a track client bound to the current token.
    pub async fn tracks(&self) -> TrackClientHandle {
        TrackClientHandle {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            access_token: self.session.read().await.access_token.clone(),
        }
    }

    /// Get a profile client bound to the current token.
    pub async fn profile(&self) -> ProfileClientHandle {
        ProfileClientHandle {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            access_token: self.session.read().await.access_token.clone(),
        }
    }

    /// Get a social client bound to the current token.
    pub async fn social(&self) -> SocialClientHandle {
        let session = self.session.read().await;
        SocialClientHandle {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            access_token: session.access_token.clone(),
            user: session.user.clone(),
        }
    }
}

/// Handle for track lookups.
///
/// This is returned by `JamApiClient::tracks()` and owns a copy of the
/// token taken when it was created.
pub struct TrackClientHandle {
    http: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl TrackClientHandle {
    /// Get the track client.
    pub fn client(&self) -> TrackClient<'_> {
        TrackClient::new(&self.http, &self.base_url, self.access_token.as_deref())
    }
}

/// Handle for the signed-in user's profile.
pub struct ProfileClientHandle {
    http: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl ProfileClientHandle {
    /// Get the profile client.
    pub fn client(&self) -> ProfileClient<'_> {
        ProfileClient::new(&self.http, &self.base_url, self.access_token.as_deref())
    }
}

/// Handle for plays, likes and comments.
pub struct SocialClientHandle {
    http: Client,
    base_url: Url,
    access_token: Option<String>,
    user: Option<SessionUser>,
}

impl SocialClientHandle {
    /// Get the social client.
    pub fn client(&self) -> SocialClient<'_> {
        SocialClient::new(&self.http, &self.base_url, self.access_token.as_deref())
    }

    /// Signed-in user captured with the handle
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }
}

#[async_trait]
impl RemoteTrackService for JamApiClient {
    async fn report_play(&self, track_id: &TrackId) -> jam_core::Result<()> {
        let handle = self.social().await;
        handle.client().report_play(track_id).await?;
        Ok(())
    }

    async fn toggle_like(&self, track_id: &TrackId) -> jam_core::Result<()> {
        let handle = self.social().await;
        handle.client().toggle_like(track_id).await?;
        Ok(())
    }

    async fn post_comment(&self, track_id: &TrackId, text: &str) -> jam_core::Result<Comment> {
        let handle = self.social().await;
        let comment = handle
            .client()
            .post_comment(track_id, text, handle.user())
            .await?;
        Ok(comment)
    }

    async fn delete_comment(
        &self,
        track_id: &TrackId,
        comment_id: &CommentId,
    ) -> jam_core::Result<()> {
        let handle = self.social().await;
        handle.client().delete_comment(track_id, comment_id).await?;
        Ok(())
    }

    async fn fetch_track(&self, track_id: &TrackId) -> jam_core::Result<Track> {
        let handle = self.tracks().await;
        Ok(handle.client().get_track(track_id).await?)
    }

    async fn fetch_user_tracks(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> jam_core::Result<TrackPage> {
        let handle = self.tracks().await;
        Ok(handle
            .client()
            .get_user_tracks(user_id, page_number, page_size)
            .await?)
    }

    async fn fetch_recent_plays(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> jam_core::Result<TrackPage> {
        let handle = self.tracks().await;
        Ok(handle
            .client()
            .get_recent_plays(user_id, page_number, page_size)
            .await?)
    }

    async fn fetch_recent_likes(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> jam_core::Result<TrackPage> {
        let handle = self.tracks().await;
        Ok(handle
            .client()
            .get_recent_likes(user_id, page_number, page_size)
            .await?)
    }

    async fn fetch_user_comments(
        &self,
        user_id: &UserId,
        page_number: u32,
        page_size: u32,
    ) -> jam_core::Result<UserCommentPage> {
        let handle = self.social().await;
        Ok(handle
            .client()
            .get_user_comments(user_id, page_number, page_size)
            .await?)
    }
}

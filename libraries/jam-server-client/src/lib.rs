//! Jam API Client
//!
//! HTTP client library for the Jam REST API.
//!
//! # Features
//!
//! - **Tracks**: Fetch a single track with comments, page through a user's uploads
//! - **Social**: Report plays, toggle likes, post and delete comments
//! - **Activity**: Recent plays, likes and comments of a user
//! - **Profile**: The signed-in user, used as author of posted comments
//! - **Player backend**: [`JamApiClient`] implements [`jam_core::RemoteTrackService`]
//!
//! Responses are unwrapped from the `{ "data": ... }` envelope. Non-2xx
//! statuses become [`ServerClientError`]s, which convert into
//! [`jam_core::JamError`].
//!
//! # Example
//!
//! ```ignore
//! use jam_server_client::{JamApiClient, ServerConfig};
//! use jam_core::{RemoteTrackService, TrackId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JamApiClient::new(ServerConfig::with_token(
//!         "http://localhost:5000/api/v1",
//!         "token",
//!     ))?;
//!
//!     let track = client.fetch_track(&TrackId::new("t-1")).await?;
//!     println!("{} by {}", track.title, track.owner_name);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod profile;
mod response;
mod social;
mod tracks;
mod types;

// Re-export main types
pub use client::{JamApiClient, ProfileClientHandle, SocialClientHandle, TrackClientHandle};
pub use error::{Result, ServerClientError};
pub use types::{ServerConfig, SessionUser, UserProfile, DEFAULT_API_URL};

// Re-export sub-clients for direct use if needed
pub use profile::ProfileClient;
pub use social::SocialClient;
pub use tracks::TrackClient;

//! Jam Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Jam Player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Comment`, `TrackPage` and their identifiers
//! - **Core Traits**: `RemoteTrackService`, the backend the player talks to
//! - **Error Handling**: Unified `JamError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use jam_core::types::{InteractionSnapshot, Track, TrackId, UserId};
//!
//! let track = Track::new(
//!     TrackId::new("track-1"),
//!     "Night Drive",
//!     "https://cdn.example.com/night-drive.mp3",
//!     UserId::new("user-1"),
//!     "sycho",
//! );
//!
//! assert_eq!(track.interaction_snapshot(), InteractionSnapshot::default());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{JamError, Result};
pub use traits::RemoteTrackService;

pub use types::{
    Comment, CommentId, InteractionSnapshot, Page, Track, TrackId, TrackPage, UserComment,
    UserCommentPage, UserId,
};

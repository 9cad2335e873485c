//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The audio output refused to load a source
    #[error("Failed to load source {url}: {reason}")]
    LoadFailed { url: String, reason: String },

    /// Audio output error
    #[error("Audio output error: {0}")]
    AudioOutput(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Core error types for Jam Player
use thiserror::Error;

/// Result type alias using `JamError`
pub type Result<T> = std::result::Result<T, JamError>;

/// Core error type for Jam Player
#[derive(Error, Debug)]
pub enum JamError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The backend requires a (valid) session
    #[error("Authentication required")]
    Unauthorized,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error (backend unreachable, timed out)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with an error status
    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl JamError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}

//! Error types for the Jam API client.

use jam_core::JamError;
use thiserror::Error;

/// Errors that can occur when talking to the Jam API.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no (valid) token was sent
    #[error("Authentication required")]
    AuthRequired,

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ServerClientError {
    /// Classify a transport-level failure
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ServerClientError::ServerUnreachable(err.to_string())
        } else {
            ServerClientError::Request(err)
        }
    }
}

impl From<ServerClientError> for JamError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::AuthRequired => JamError::Unauthorized,
            ServerClientError::NotFound(resource) => JamError::not_found("resource", resource),
            ServerClientError::ServerError { status, message } => {
                JamError::Remote { status, message }
            }
            ServerClientError::InvalidUrl(msg) => JamError::invalid_input(msg),
            ServerClientError::Request(e) => JamError::network(e.to_string()),
            ServerClientError::ServerUnreachable(msg) => JamError::network(msg),
            ServerClientError::ParseError(msg) => JamError::Other(msg),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_into_core_errors() {
        assert!(matches!(
            JamError::from(ServerClientError::AuthRequired),
            JamError::Unauthorized
        ));
        assert!(matches!(
            JamError::from(ServerClientError::ServerUnreachable("refused".into())),
            JamError::Network(_)
        ));
        assert!(matches!(
            JamError::from(ServerClientError::ServerError {
                status: 503,
                message: "busy".into()
            }),
            JamError::Remote { status: 503, .. }
        ));
        assert!(matches!(
            JamError::from(ServerClientError::NotFound("/Track/x".into())),
            JamError::NotFound { .. }
        ));
    }
}

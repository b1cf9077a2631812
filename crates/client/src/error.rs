//! Client error types

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, timeout or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed (HTTP 401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Session storage could not be read or written
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 | 422 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status carried by this error, if the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::ServerError { status, .. } => Some(*status),
            Self::AuthenticationFailed(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::BadRequest(_) => Some(400),
            Self::Forbidden(_) => Some(403),
            Self::Serialization(_) | Self::Configuration(_) | Self::Storage(_) => None,
        }
    }

    /// Whether the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// Whether the request timed out before a response arrived
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_timeout())
    }
}

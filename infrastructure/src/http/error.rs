//! Error types for the HTTP adapter

use docchat_application::ApiError;
use thiserror::Error;

/// Result type alias for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur when talking to the chat server over HTTP
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {error}\nRaw response: {raw}")]
    Decode { error: String, raw: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.to_string())
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status, .. } => ApiError::Status { status },
            TransportError::Network(message) => ApiError::Network(message),
            TransportError::Decode { error, .. } => ApiError::InvalidResponse(error),
            TransportError::InvalidUrl(message) | TransportError::Client(message) => {
                ApiError::Network(message)
            }
        }
    }
}

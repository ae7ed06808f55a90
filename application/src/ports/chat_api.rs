//! Chat API port
//!
//! Defines the interface to the remote assistant service. The server owns
//! session storage and inference; this client only issues requests.

use async_trait::async_trait;
use docchat_domain::{Message, Session, SessionId};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while talking to the chat server
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Reply to a chat message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// Source documents the server consulted; never displayed
    #[serde(default)]
    pub documents: Vec<String>,
}

/// Gateway to the chat server
///
/// Every call is a single round trip: no retries, no cancellation. The
/// current session is identified by the server (cookie), not passed in.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /api/chat`
    async fn send_message(&self, message: &str) -> Result<ChatReply, ApiError>;

    /// `GET /api/sessions`
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError>;

    /// `POST /api/new_session`
    ///
    /// Returns the new session's id when the server reports one.
    async fn new_session(&self) -> Result<Option<SessionId>, ApiError>;

    /// `POST /api/switch_session`
    async fn switch_session(&self, id: &SessionId) -> Result<(), ApiError>;

    /// `POST /api/delete_session`
    async fn delete_session(&self, id: &SessionId) -> Result<(), ApiError>;

    /// `GET /api/chat_history` for the current session
    async fn chat_history(&self) -> Result<Vec<Message>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        assert_eq!(ApiError::Status { status: 500 }.status(), Some(500));
        assert_eq!(ApiError::Network("refused".into()).status(), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            ApiError::Status { status: 404 }.to_string(),
            "HTTP error! status: 404"
        );
    }

    #[test]
    fn test_reply_documents_optional() {
        let reply: ChatReply = serde_json::from_str(r#"{"response": "hi"}"#).unwrap();
        assert_eq!(reply.response, "hi");
        assert!(reply.documents.is_empty());

        let reply: ChatReply =
            serde_json::from_str(r#"{"response": "hi", "documents": ["a.pdf"]}"#).unwrap();
        assert_eq!(reply.documents, vec!["a.pdf".to_string()]);
    }
}

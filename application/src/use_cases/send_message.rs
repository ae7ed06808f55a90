//! Send Message use case.
//!
//! Validates composer input and performs the single `POST /api/chat`
//! round trip. Used by the controller and by one-shot CLI mode.

use crate::ports::chat_api::{ApiError, ChatApi, ChatReply};
use docchat_domain::DomainError;
use docchat_domain::util::truncate_str;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while sending a message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Failed to send message: {0}")]
    Api(#[from] ApiError),
}

/// Use case for sending one chat message
#[derive(Clone)]
pub struct SendMessageUseCase {
    api: Arc<dyn ChatApi>,
}

impl SendMessageUseCase {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        Self { api }
    }

    /// Trim `text` and send it.
    ///
    /// Empty or whitespace-only input is rejected without a request.
    pub async fn execute(&self, text: &str) -> Result<ChatReply, SendMessageError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(DomainError::EmptyMessage.into());
        }

        info!("Sending message: {}", truncate_str(message, 80));
        let reply = self.api.send_message(message).await?;
        debug!(
            "Received reply ({} chars, {} source documents)",
            reply.response.chars().count(),
            reply.documents.len()
        );
        Ok(reply)
    }
}

//! TUI confirmation — ConfirmationPort via oneshot channels
//!
//! Instead of blocking on stdin, sends a [`ConfirmRequest`] to the TUI
//! event loop, which shows a modal and sends back the answer.

use super::event::ConfirmRequest;
use async_trait::async_trait;
use docchat_application::{ConfirmationError, ConfirmationPort};
use tokio::sync::{mpsc, oneshot};

/// Channel-based ConfirmationPort for the TUI
pub struct TuiConfirmation {
    confirm_tx: mpsc::UnboundedSender<ConfirmRequest>,
}

impl TuiConfirmation {
    pub fn new(confirm_tx: mpsc::UnboundedSender<ConfirmRequest>) -> Self {
        Self { confirm_tx }
    }
}

#[async_trait]
impl ConfirmationPort for TuiConfirmation {
    async fn confirm(&self, prompt: &str) -> Result<bool, ConfirmationError> {
        let (response_tx, response_rx) = oneshot::channel();

        self.confirm_tx
            .send(ConfirmRequest {
                prompt: prompt.to_string(),
                response_tx,
            })
            .map_err(|_| ConfirmationError::ChannelClosed)?;

        response_rx
            .await
            .map_err(|_| ConfirmationError::ChannelClosed)
    }
}

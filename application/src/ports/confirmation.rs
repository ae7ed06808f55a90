//! Confirmation port for destructive actions.
//!
//! # Architecture
//!
//! - **Port**: [`ConfirmationPort`] - defined here in application layer
//! - **Adapter**: `TuiConfirmation` - modal dialog in the presentation layer
//!
//! # Built-in Implementations
//!
//! - [`AutoConfirm`] - Always answers with a fixed decision

use async_trait::async_trait;
use thiserror::Error;

/// Failures while asking, as opposed to the user saying no
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationError {
    #[error("Confirmation channel closed")]
    ChannelClosed,
}

/// Asks the user a yes/no question
#[async_trait]
pub trait ConfirmationPort: Send + Sync {
    /// Returns `Ok(true)` when the user agreed
    async fn confirm(&self, prompt: &str) -> Result<bool, ConfirmationError>;
}

/// Answers every prompt with the same decision
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

#[async_trait]
impl ConfirmationPort for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> Result<bool, ConfirmationError> {
        Ok(self.0)
    }
}

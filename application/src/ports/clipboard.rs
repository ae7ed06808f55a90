//! Clipboard port
//!
//! Used by the copy action on chat bubbles.

use thiserror::Error;

/// Clipboard operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("OSC 52 clipboard failed: {0}")]
    Osc52(String),

    #[error("System clipboard failed: {0}")]
    System(String),
}

/// Writes text to the user's clipboard
pub trait ClipboardPort: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

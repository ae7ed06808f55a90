//! Clipboard adapter.
//!
//! Copies with two transports:
//! 1. OSC 52 - terminal clipboard escape sequence (works over SSH)
//! 2. System clipboard via `arboard`

use base64::Engine;
use docchat_application::{ClipboardError, ClipboardPort};
use std::io::Write;
use tracing::debug;

/// Clipboard backed by the terminal and the OS
#[derive(Debug, Clone, Copy)]
pub struct SystemClipboard {
    osc52: bool,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self { osc52: true }
    }
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the escape sequence and go straight to the OS clipboard
    pub fn without_osc52() -> Self {
        Self { osc52: false }
    }

    fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| ClipboardError::Osc52(e.to_string()))
    }

    fn copy_system(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::System(e.to_string()))
    }
}

impl ClipboardPort for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if self.osc52 {
            match Self::copy_osc52(text) {
                Ok(()) => return Ok(()),
                Err(e) => debug!("{}; falling back to system clipboard", e),
            }
        }
        Self::copy_system(text)
    }
}

/// `ESC ] 52 ; c ; <base64> ESC \`, where `c` selects the system clipboard
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{}\x1b\\", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x1b\\");
    }

    #[test]
    fn test_osc52_sequence_utf8() {
        let seq = osc52_sequence("héllo\n```code```");
        assert!(seq.starts_with("\x1b]52;c;"));
        assert!(seq.ends_with("\x1b\\"));
        assert!(!seq.contains('\n'));
    }
}

//! Message renderer.
//!
//! Turns a role + content pair into a [`MessageView`]: formatting, the
//! collapse flag and a local `HH:MM` timestamp.

use chrono::Local;
use docchat_domain::text::WELCOME_MESSAGE;
use docchat_domain::{Message, MessageView, Role};

/// Builds chat bubbles
#[derive(Debug, Clone, Default)]
pub struct MessageRenderer {
    /// Timestamp override for deterministic output
    fixed_time: Option<String>,
}

impl MessageRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every bubble with `time` instead of the wall clock
    pub fn with_fixed_time(time: impl Into<String>) -> Self {
        Self {
            fixed_time: Some(time.into()),
        }
    }

    pub fn render(&self, role: Role, content: impl Into<String>) -> MessageView {
        let message = Message {
            role,
            content: content.into(),
        };
        MessageView::new(message, self.timestamp())
    }

    pub fn render_message(&self, message: Message) -> MessageView {
        MessageView::new(message, self.timestamp())
    }

    /// The fixed assistant greeting
    pub fn welcome(&self) -> MessageView {
        self.render(Role::Assistant, WELCOME_MESSAGE)
    }

    fn timestamp(&self) -> String {
        match &self.fixed_time {
            Some(time) => time.clone(),
            None => Local::now().format("%H:%M").to_string(),
        }
    }
}

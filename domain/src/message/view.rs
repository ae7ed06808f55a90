//! Rendered chat bubble

use super::entities::{Message, Role};
use super::format::{Segment, format_segments};
use crate::core::text::{SHOW_LESS, SHOW_MORE};

/// Assistant replies longer than this many characters start collapsed
pub const EXPAND_THRESHOLD: usize = 500;

/// Whether a message gets the "Show more" wrapper
pub fn is_collapsible(role: Role, content: &str) -> bool {
    role == Role::Assistant && content.chars().count() > EXPAND_THRESHOLD
}

/// A message as displayed in the conversation pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub role: Role,
    /// Original text, used for copy and edit
    pub content: String,
    pub segments: Vec<Segment>,
    pub collapsible: bool,
    pub expanded: bool,
    /// Local `HH:MM` at render time
    pub timestamp: String,
}

impl MessageView {
    pub fn new(message: Message, timestamp: impl Into<String>) -> Self {
        let collapsible = is_collapsible(message.role, &message.content);
        Self {
            role: message.role,
            segments: format_segments(&message.content),
            content: message.content,
            collapsible,
            expanded: false,
            timestamp: timestamp.into(),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsible && !self.expanded
    }

    /// Flip the expanded flag. Returns false for non-collapsible messages.
    pub fn toggle_expanded(&mut self) -> bool {
        if !self.collapsible {
            return false;
        }
        self.expanded = !self.expanded;
        true
    }

    /// Label for the expand toggle, if this bubble has one
    pub fn toggle_label(&self) -> Option<&'static str> {
        match (self.collapsible, self.expanded) {
            (false, _) => None,
            (true, false) => Some(SHOW_MORE),
            (true, true) => Some(SHOW_LESS),
        }
    }

    /// Only user messages can be copied back into the composer
    pub fn can_edit(&self) -> bool {
        self.role == Role::User
    }
}

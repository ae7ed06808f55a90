//! Fixed user-facing strings.

/// Assistant greeting shown for a fresh or empty conversation
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm Zetheta AI, your document-aware assistant. How can I help you today?";

/// Replaces the loading placeholder when sending a message fails
pub const APOLOGY_MESSAGE: &str =
    "I apologize, but I encountered an error processing your request. Please try again.";

/// Title shown after creating a session, until the server renames it
pub const NEW_CONVERSATION_TITLE: &str = "New Conversation";

/// Sidebar placeholder when a search matches nothing
pub const NO_RESULTS_PLACEHOLDER: &str = "No conversations found";

pub const COPY_TOAST: &str = "Message copied to clipboard";

pub const COPY_FAILED_TOAST: &str = "Failed to copy message";

pub const DELETE_CONFIRM_PROMPT: &str =
    "Are you sure you want to delete this chat? This cannot be undone.";

pub const DELETE_FAILED_ALERT: &str = "Failed to delete chat session. Please try again.";

pub const SHOW_MORE: &str = "Show more";

pub const SHOW_LESS: &str = "Show less";

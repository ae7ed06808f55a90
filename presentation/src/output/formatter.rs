//! Output formatter trait

use docchat_application::ChatReply;
use docchat_domain::Session;

/// Turns one-shot command results into printable text
pub trait OutputFormatter {
    /// Format an assistant reply
    fn format_reply(&self, reply: &ChatReply) -> String;

    /// Format the session list
    fn format_sessions(&self, sessions: &[Session]) -> String;
}

//! Chat view-model — the single source of truth for the terminal UI.
//!
//! The UI is a pure projection of this struct. Every server round trip
//! lands here first; widgets only read from it.

use super::toast::Toast;
use crate::core::text::{NEW_CONVERSATION_TITLE, NO_RESULTS_PLACEHOLDER};
use crate::message::view::MessageView;
use crate::session::entities::{Session, SessionId};
use crate::session::filter::filter_sessions;

/// View state for one chat window
///
/// Invariants:
/// - at most one session is active, and it is the one whose messages are
///   in `messages`
/// - the loading placeholder (`pending`) is always rendered after the last
///   message
#[derive(Debug, Clone)]
pub struct ChatViewModel {
    active_session_id: Option<SessionId>,
    title: String,
    messages: Vec<MessageView>,
    pending: bool,
    sessions: Vec<Session>,
    sidebar_open: bool,
    filter: String,
    follow_ups: Vec<String>,
    toast: Option<Toast>,
    toast_seq: u64,
}

impl Default for ChatViewModel {
    fn default() -> Self {
        Self {
            active_session_id: None,
            title: NEW_CONVERSATION_TITLE.to_string(),
            messages: Vec::new(),
            pending: false,
            sessions: Vec::new(),
            sidebar_open: false,
            filter: String::new(),
            follow_ups: Vec::new(),
            toast: None,
            toast_seq: 0,
        }
    }
}

impl ChatViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sidebar_open(mut self, open: bool) -> Self {
        self.sidebar_open = open;
        self
    }

    // -- Sessions --

    pub fn active_session_id(&self) -> Option<&SessionId> {
        self.active_session_id.as_ref()
    }

    pub fn is_active(&self, id: &SessionId) -> bool {
        self.active_session_id.as_ref() == Some(id)
    }

    /// The sidebar entry carrying the active marker, if it is listed
    pub fn active_session(&self) -> Option<&Session> {
        let active = self.active_session_id.as_ref()?;
        self.sessions.iter().find(|s| &s.id == active)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Replace the sidebar list. The active id survives the refresh.
    pub fn set_sessions(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
    }

    /// Mark `id` active and take its title, when the sidebar knows it.
    pub fn set_active(&mut self, id: SessionId) {
        if let Some(session) = self.sessions.iter().find(|s| s.id == id) {
            self.title = session.title.clone();
        }
        self.active_session_id = Some(id);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    // -- Messages --

    pub fn messages(&self) -> &[MessageView] {
        &self.messages
    }

    pub fn message(&self, index: usize) -> Option<&MessageView> {
        self.messages.get(index)
    }

    pub fn push_message(&mut self, message: MessageView) {
        self.messages.push(message);
    }

    /// Drop every rendered message, the placeholder and any chips
    pub fn clear_conversation(&mut self) {
        self.messages.clear();
        self.pending = false;
        self.follow_ups.clear();
    }

    /// Reset to a fresh conversation showing only `welcome`.
    pub fn start_new_conversation(&mut self, id: Option<SessionId>, welcome: MessageView) {
        self.clear_conversation();
        self.messages.push(welcome);
        self.title = NEW_CONVERSATION_TITLE.to_string();
        self.active_session_id = id;
    }

    pub fn toggle_expanded(&mut self, index: usize) -> bool {
        self.messages
            .get_mut(index)
            .is_some_and(|m| m.toggle_expanded())
    }

    // -- Loading placeholder --

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn begin_pending(&mut self) {
        self.pending = true;
    }

    /// Replace the placeholder with `message`
    pub fn resolve_pending(&mut self, message: MessageView) {
        self.pending = false;
        self.messages.push(message);
    }

    // -- Sidebar --

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Flip sidebar visibility, returning the new state
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    // -- Search filter --

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.filter = query.into();
    }

    pub fn visible_sessions(&self) -> Vec<&Session> {
        filter_sessions(&self.sessions, &self.filter)
    }

    /// Placeholder to show instead of an empty, filtered sidebar
    pub fn no_results_placeholder(&self) -> Option<&'static str> {
        if !self.filter.trim().is_empty() && self.visible_sessions().is_empty() {
            Some(NO_RESULTS_PLACEHOLDER)
        } else {
            None
        }
    }

    // -- Follow-up chips --

    pub fn follow_ups(&self) -> &[String] {
        &self.follow_ups
    }

    pub fn set_follow_ups(&mut self, follow_ups: Vec<String>) {
        self.follow_ups = follow_ups;
    }

    pub fn clear_follow_ups(&mut self) {
        self.follow_ups.clear();
    }

    // -- Toast --

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Replace any current toast with a new one, returning its generation
    pub fn show_toast(&mut self, message: impl Into<String>) -> u64 {
        self.toast_seq += 1;
        self.toast = Some(Toast::new(message, self.toast_seq));
        self.toast_seq
    }

    /// Move the toast of `generation` to its next phase, removing it after
    /// the fade-out. Returns false when that toast is no longer shown.
    pub fn advance_toast(&mut self, generation: u64) -> bool {
        let Some(toast) = self.toast.as_mut() else {
            return false;
        };
        if toast.generation != generation {
            return false;
        }
        match toast.phase.next() {
            Some(phase) => toast.phase = phase,
            None => self.toast = None,
        }
        true
    }
}

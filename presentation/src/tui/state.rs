//! TUI-local state
//!
//! The chat itself lives in the controller's view-model; this struct holds
//! the latest snapshot of it plus everything that only matters to the
//! terminal: editing buffers, selections, modals and hit areas.

use super::mode::InputMode;
use docchat_domain::{ChatViewModel, SessionId};
use ratatui::layout::{Position, Rect};
use std::time::{Duration, Instant};

/// Composer height limit, in text lines
pub const MAX_INPUT_LINES: u16 = 8;

/// Screen regions that react to mouse clicks, captured at draw time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub sidebar: Option<Rect>,
    pub sidebar_toggle: Rect,
    /// Sidebar is drawn over the conversation (narrow terminal)
    pub sidebar_overlays: bool,
}

impl HitAreas {
    /// Whether a left click at `(column, row)` should close the overlay sidebar
    pub fn closes_sidebar(&self, column: u16, row: u16) -> bool {
        let Some(sidebar) = self.sidebar else {
            return false;
        };
        let position = Position::new(column, row);
        self.sidebar_overlays
            && !sidebar.contains(position)
            && !self.sidebar_toggle.contains(position)
    }

    pub fn hits_toggle(&self, column: u16, row: u16) -> bool {
        self.sidebar_toggle.contains(Position::new(column, row))
    }
}

#[derive(Debug, Clone)]
pub struct TuiState {
    pub mode: InputMode,

    // -- Composer --
    pub input: String,
    pub cursor_pos: usize,

    // -- Session search box --
    pub search_input: String,
    pub search_cursor: usize,

    // -- Controller snapshot --
    pub view: ChatViewModel,

    // -- Selection --
    /// Selected bubble; `None` follows the newest message
    pub selected_message: Option<usize>,
    /// Index into the visible (filtered) session list
    pub selected_session: usize,

    // -- Overlays --
    pub show_help: bool,
    pub confirm_prompt: Option<String>,
    pub alert: Option<String>,
    pub flash_message: Option<(String, Instant)>,

    /// Animation counter for the loading dots
    pub tick: u64,
    pub hit_areas: HitAreas,
    pub should_quit: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            mode: InputMode::default(),
            input: String::new(),
            cursor_pos: 0,
            search_input: String::new(),
            search_cursor: 0,
            view: ChatViewModel::new(),
            selected_message: None,
            selected_session: 0,
            show_help: false,
            confirm_prompt: None,
            alert: None,
            flash_message: None,
            tick: 0,
            hit_areas: HitAreas::default(),
            should_quit: false,
        }
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, view: ChatViewModel) -> Self {
        self.view = view;
        self
    }

    /// A modal owns the keyboard until dismissed
    pub fn modal_open(&self) -> bool {
        self.confirm_prompt.is_some() || self.alert.is_some()
    }

    // -- Input editing --

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.active_cursor();
        self.active_input_mut().insert(cursor, c);
        *self.active_cursor_mut() += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        let cursor = self.active_cursor();
        if cursor > 0 {
            let prev_char_len = prev_char_len(self.active_input(), cursor);
            self.active_input_mut().remove(cursor - prev_char_len);
            *self.active_cursor_mut() -= prev_char_len;
        }
    }

    pub fn cursor_left(&mut self) {
        let cursor = self.active_cursor();
        let step = prev_char_len(self.active_input(), cursor);
        *self.active_cursor_mut() -= step;
    }

    pub fn cursor_right(&mut self) {
        let cursor = self.active_cursor();
        let step = self.active_input()[cursor..]
            .chars()
            .next()
            .map(|c| c.len_utf8())
            .unwrap_or(0);
        *self.active_cursor_mut() += step;
    }

    pub fn cursor_home(&mut self) {
        *self.active_cursor_mut() = 0;
    }

    pub fn cursor_end(&mut self) {
        let len = self.active_input().len();
        *self.active_cursor_mut() = len;
    }

    /// Insert a newline into the composer
    pub fn insert_newline(&mut self) {
        self.input.insert(self.cursor_pos, '\n');
        self.cursor_pos += 1;
    }

    /// Number of lines in the composer buffer
    pub fn input_line_count(&self) -> usize {
        self.input.lines().count().max(1) + usize::from(self.input.ends_with('\n'))
    }

    /// Take the composer contents and clear it
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    /// Replace the composer contents, cursor at the end
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor_pos = self.input.len();
    }

    fn active_input(&self) -> &str {
        match self.mode {
            InputMode::Search => &self.search_input,
            _ => &self.input,
        }
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.mode {
            InputMode::Search => &mut self.search_input,
            _ => &mut self.input,
        }
    }

    fn active_cursor(&self) -> usize {
        match self.mode {
            InputMode::Search => self.search_cursor,
            _ => self.cursor_pos,
        }
    }

    fn active_cursor_mut(&mut self) -> &mut usize {
        match self.mode {
            InputMode::Search => &mut self.search_cursor,
            _ => &mut self.cursor_pos,
        }
    }

    // -- Controller snapshot --

    /// Replace the view-model snapshot and keep selections in range
    pub fn apply_view(&mut self, view: ChatViewModel) {
        let message_count = view.messages().len();
        if self.selected_message.is_some_and(|i| i >= message_count) {
            self.selected_message = None;
        }

        let session_count = view.visible_sessions().len();
        self.selected_session = self.selected_session.min(session_count.saturating_sub(1));

        // Only a close leaves sidebar focus; a stale snapshot from before an
        // open request must not
        let closed = self.view.sidebar_open() && !view.sidebar_open();
        if closed && matches!(self.mode, InputMode::Sidebar | InputMode::Search) {
            self.mode = InputMode::Normal;
        }

        self.view = view;
    }

    // -- Message selection --

    pub fn select_prev_message(&mut self) {
        let len = self.view.messages().len();
        self.selected_message = match self.selected_message {
            _ if len == 0 => None,
            None => Some(len - 1),
            Some(i) => Some(i.saturating_sub(1)),
        };
    }

    /// Moving past the newest message returns to following the tail
    pub fn select_next_message(&mut self) {
        let len = self.view.messages().len();
        self.selected_message = match self.selected_message {
            Some(i) if i + 1 < len => Some(i + 1),
            _ => None,
        };
    }

    /// Bubble that message actions apply to: the selection, else the newest
    pub fn target_message(&self) -> Option<usize> {
        self.selected_message
            .or_else(|| self.view.messages().len().checked_sub(1))
    }

    // -- Session selection --

    pub fn select_prev_session(&mut self) {
        self.selected_session = self.selected_session.saturating_sub(1);
    }

    pub fn select_next_session(&mut self) {
        let len = self.view.visible_sessions().len();
        if self.selected_session + 1 < len {
            self.selected_session += 1;
        }
    }

    pub fn selected_session_id(&self) -> Option<SessionId> {
        self.view
            .visible_sessions()
            .get(self.selected_session)
            .map(|session| session.id.clone())
    }

    // -- Flash --

    pub fn set_flash(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), Instant::now()));
    }

    /// Clear flash if older than the given duration
    pub fn expire_flash(&mut self, max_age: Duration) {
        if let Some((_, created)) = &self.flash_message
            && created.elapsed() > max_age
        {
            self.flash_message = None;
        }
    }
}

fn prev_char_len(text: &str, cursor: usize) -> usize {
    text[..cursor]
        .chars()
        .next_back()
        .map(|c| c.len_utf8())
        .unwrap_or(0)
}

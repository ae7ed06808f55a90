//! TUI mode system (vim-like mode switching)
//!
//! - Normal: navigate messages, trigger bubble actions
//! - Insert: edit the composer
//! - Sidebar: pick, switch and delete sessions
//! - Search: type a session filter

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

/// Which part of the screen owns the keyboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
    Sidebar,
    Search,
}

impl InputMode {
    /// Mode indicator string for the status bar
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Sidebar => "SESSIONS",
            Self::Search => "SEARCH",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Normal => Color::Blue,
            Self::Insert => Color::Green,
            Self::Sidebar => Color::Magenta,
            Self::Search => Color::Yellow,
        }
    }

    /// Key hints shown on the right of the status bar
    pub fn hints(&self) -> &'static str {
        match self {
            Self::Normal => {
                "i:insert  Tab:sessions  n:new  /:search  j/k:select  y:copy  ?:help  q:quit"
            }
            Self::Insert => "Enter:send  Alt+Enter:newline  Esc:normal",
            Self::Sidebar => "j/k:select  Enter:open  d:delete  /:search  Esc:back",
            Self::Search => "type to filter  Enter:results  Esc:done",
        }
    }
}

/// Semantic action derived from a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,

    // -- Mode transitions --
    EnterInsert,
    EnterSearch,
    FocusSidebar,
    ExitToNormal,

    // -- Composer editing --
    InsertChar(char),
    InsertNewline,
    DeleteChar,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    SubmitInput,

    // -- Message actions --
    SelectPrevMessage,
    SelectNextMessage,
    ToggleExpanded,
    CopyMessage,
    EditMessage,
    ChooseFollowUp(usize),

    // -- Sessions --
    ToggleSidebar,
    NewSession,
    RefreshSessions,
    SelectPrevSession,
    SelectNextSession,
    OpenSession,
    DeleteSession,
    SearchResults,

    // -- Application --
    ShowHelp,
    Quit,
}

/// Map a key event to an action for the given mode
pub fn handle_key_event(mode: InputMode, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }

    match mode {
        InputMode::Normal => handle_normal(key),
        InputMode::Insert => handle_insert(key),
        InputMode::Sidebar => handle_sidebar(key),
        InputMode::Search => handle_search(key),
    }
}

fn handle_normal(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('a') => KeyAction::EnterInsert,
        KeyCode::Tab => KeyAction::ToggleSidebar,
        KeyCode::Char('s') => KeyAction::FocusSidebar,
        KeyCode::Char('n') => KeyAction::NewSession,
        KeyCode::Char('r') => KeyAction::RefreshSessions,
        KeyCode::Char('/') => KeyAction::EnterSearch,
        KeyCode::Char('k') | KeyCode::Up => KeyAction::SelectPrevMessage,
        KeyCode::Char('j') | KeyCode::Down => KeyAction::SelectNextMessage,
        KeyCode::Enter | KeyCode::Char('o') => KeyAction::ToggleExpanded,
        KeyCode::Char('y') => KeyAction::CopyMessage,
        KeyCode::Char('e') => KeyAction::EditMessage,
        KeyCode::Char(c @ '1'..='9') => KeyAction::ChooseFollowUp(c as usize - '1' as usize),
        KeyCode::Char('?') => KeyAction::ShowHelp,
        KeyCode::Char('q') => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

fn handle_insert(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::ExitToNormal,
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
        {
            KeyAction::InsertNewline
        }
        KeyCode::Enter => KeyAction::SubmitInput,
        KeyCode::Char(c) => KeyAction::InsertChar(c),
        KeyCode::Backspace => KeyAction::DeleteChar,
        KeyCode::Left => KeyAction::CursorLeft,
        KeyCode::Right => KeyAction::CursorRight,
        KeyCode::Home => KeyAction::CursorHome,
        KeyCode::End => KeyAction::CursorEnd,
        _ => KeyAction::None,
    }
}

fn handle_sidebar(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::ExitToNormal,
        KeyCode::Tab => KeyAction::ToggleSidebar,
        KeyCode::Char('k') | KeyCode::Up => KeyAction::SelectPrevSession,
        KeyCode::Char('j') | KeyCode::Down => KeyAction::SelectNextSession,
        KeyCode::Enter => KeyAction::OpenSession,
        KeyCode::Char('d') | KeyCode::Delete => KeyAction::DeleteSession,
        KeyCode::Char('n') => KeyAction::NewSession,
        KeyCode::Char('/') => KeyAction::EnterSearch,
        KeyCode::Char('q') => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

fn handle_search(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::ExitToNormal,
        KeyCode::Enter => KeyAction::SearchResults,
        KeyCode::Char(c) => KeyAction::InsertChar(c),
        KeyCode::Backspace => KeyAction::DeleteChar,
        KeyCode::Left => KeyAction::CursorLeft,
        KeyCode::Right => KeyAction::CursorRight,
        KeyCode::Home => KeyAction::CursorHome,
        KeyCode::End => KeyAction::CursorEnd,
        _ => KeyAction::None,
    }
}

/// Answer to a yes/no modal, if the key decides it
pub fn confirm_answer(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

//! TUI application — main loop with Actor pattern
//!
//! Architecture:
//! ```text
//! TuiApp (select! loop)                   ChatController::run (tokio::spawn)
//!   ├─ crossterm EventStream                ├─ inbox.recv()
//!   ├─ ui_rx (UiEvent from controller)      ├─ timer events
//!   ├─ confirm_rx (ConfirmRequest)          └─ TuiConfirmation ──> confirm_rx
//!   └─ tick_interval
//!        └── cmd_tx ───────────────────>────┘
//! ```

use super::confirmation::TuiConfirmation;
use super::event::ConfirmRequest;
use super::mode::{self, InputMode, KeyAction};
use super::state::{HitAreas, MAX_INPUT_LINES, TuiState};
use super::widgets::{
    LayoutParams, MainLayout, conversation::ConversationWidget, follow_ups::FollowUpsWidget,
    header::HeaderWidget, help::HelpWidget, input::InputWidget, modal::ModalWidget,
    sidebar::SidebarWidget, status_bar::StatusBarWidget, toast::ToastWidget,
};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use docchat_application::{ChatApi, ChatCommand, ChatController, ClipboardPort, UiEvent, UiTiming};
use docchat_domain::ChatViewModel;
use futures::stream::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

const TICK: Duration = Duration::from_millis(250);
const FLASH_TTL: Duration = Duration::from_secs(3);

/// Startup options for the terminal UI
#[derive(Debug, Clone)]
pub struct TuiSettings {
    pub timing: UiTiming,
    /// Below this many columns the sidebar overlays the conversation
    pub narrow_width: u16,
    pub sidebar_open: bool,
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            timing: UiTiming::default(),
            narrow_width: 100,
            sidebar_open: true,
        }
    }
}

/// Main TUI application
pub struct TuiApp {
    // -- Actor channels --
    cmd_tx: mpsc::UnboundedSender<ChatCommand>,
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    confirm_rx: mpsc::UnboundedReceiver<ConfirmRequest>,

    // -- Pending confirmation answer --
    pending_confirm: Option<oneshot::Sender<bool>>,

    narrow_width: u16,
    initial_view: ChatViewModel,

    // -- Controller task handle --
    _controller_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TuiApp {
    /// Create a new TUI application wired to a freshly spawned controller
    pub fn new(
        api: Arc<dyn ChatApi>,
        clipboard: Arc<dyn ClipboardPort>,
        settings: TuiSettings,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<ChatCommand>();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
        let (confirm_tx, confirm_rx) = mpsc::unbounded_channel::<ConfirmRequest>();

        let confirmation = Arc::new(TuiConfirmation::new(confirm_tx));
        let controller = ChatController::new(api, clipboard, confirmation, settings.timing, ui_tx)
            .with_sidebar_open(settings.sidebar_open);
        let controller_handle = tokio::spawn(controller.run(cmd_rx));

        let mut app = Self::from_channels(cmd_tx, ui_rx, confirm_rx, settings.narrow_width);
        app.initial_view = ChatViewModel::new().with_sidebar_open(settings.sidebar_open);
        app._controller_handle = Some(controller_handle);
        app
    }

    fn from_channels(
        cmd_tx: mpsc::UnboundedSender<ChatCommand>,
        ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        confirm_rx: mpsc::UnboundedReceiver<ConfirmRequest>,
        narrow_width: u16,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            confirm_rx,
            pending_confirm: None,
            narrow_width,
            initial_view: ChatViewModel::new(),
            _controller_handle: None,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Install panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(info);
        }));

        let mut state = TuiState::new().with_view(self.initial_view.clone());
        let mut event_stream = EventStream::new();
        let mut tick = tokio::time::interval(TICK);
        let narrow_width = self.narrow_width;

        info!("TUI started");
        self.send(ChatCommand::Init);

        loop {
            terminal.draw(|frame| {
                let layout = compute_layout(frame.area(), &state, narrow_width);
                render(frame, &state, &layout);
                state.hit_areas = HitAreas {
                    sidebar: layout.sidebar,
                    sidebar_toggle: HeaderWidget::toggle_area(layout.header),
                    sidebar_overlays: layout.sidebar_overlays,
                };
            })?;

            if state.should_quit {
                break;
            }

            tokio::select! {
                // Terminal events (keyboard, mouse, resize)
                Some(Ok(term_event)) = event_stream.next() => {
                    self.handle_terminal_event(&mut state, term_event);
                }

                // Snapshots and effects from the controller
                Some(ui_event) = self.ui_rx.recv() => {
                    self.apply_ui_event(&mut state, ui_event);
                }

                // Delete confirmations
                Some(request) = self.confirm_rx.recv() => {
                    self.show_confirm(&mut state, request);
                }

                // Loading dots and flash expiry
                _ = tick.tick() => {
                    state.tick = state.tick.wrapping_add(1);
                    state.expire_flash(FLASH_TTL);
                }
            }
        }

        self.send(ChatCommand::Quit);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("TUI stopped");

        Ok(())
    }

    fn send(&self, command: ChatCommand) {
        // Controller gone means it already shut down
        let _ = self.cmd_tx.send(command);
    }

    /// Handle a terminal (crossterm) event
    fn handle_terminal_event(&mut self, state: &mut TuiState, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(state, key),
            Event::Mouse(mouse) => self.handle_mouse(state, mouse),
            // Terminal auto-resizes on next draw
            _ => {}
        }
    }

    fn handle_key(&mut self, state: &mut TuiState, key: KeyEvent) {
        if state.confirm_prompt.is_some() {
            if let Some(answer) = mode::confirm_answer(key) {
                state.confirm_prompt = None;
                self.answer_confirm(answer);
            }
            return;
        }

        if state.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                state.alert = None;
            }
            return;
        }

        if state.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                state.show_help = false;
            }
            return;
        }

        let action = mode::handle_key_event(state.mode, key);
        self.handle_action(state, action);
    }

    /// Handle a semantic key action
    fn handle_action(&mut self, state: &mut TuiState, action: KeyAction) {
        match action {
            KeyAction::None => {}

            // Mode transitions
            KeyAction::EnterInsert => state.mode = InputMode::Insert,
            KeyAction::EnterSearch => {
                if !state.view.sidebar_open() {
                    self.send(ChatCommand::ToggleSidebar);
                }
                state.mode = InputMode::Search;
                state.search_cursor = state.search_input.len();
            }
            KeyAction::FocusSidebar => {
                if !state.view.sidebar_open() {
                    self.send(ChatCommand::ToggleSidebar);
                }
                state.mode = InputMode::Sidebar;
            }
            KeyAction::ExitToNormal => state.mode = InputMode::Normal,

            // Text editing
            KeyAction::InsertChar(c) => {
                state.insert_char(c);
                self.search_edited(state);
            }
            KeyAction::DeleteChar => {
                state.delete_char();
                self.search_edited(state);
            }
            KeyAction::InsertNewline => state.insert_newline(),
            KeyAction::CursorLeft => state.cursor_left(),
            KeyAction::CursorRight => state.cursor_right(),
            KeyAction::CursorHome => state.cursor_home(),
            KeyAction::CursorEnd => state.cursor_end(),

            KeyAction::SubmitInput => {
                if state.input.trim().is_empty() {
                    return;
                }
                let input = state.take_input();
                state.selected_message = None;
                self.send(ChatCommand::Submit(input));
            }

            // Message actions
            KeyAction::SelectPrevMessage => state.select_prev_message(),
            KeyAction::SelectNextMessage => state.select_next_message(),
            // No selection targets whatever is newest when the controller gets it
            KeyAction::ToggleExpanded => {
                if state.target_message().is_some() {
                    self.send(ChatCommand::ToggleExpanded(state.selected_message));
                }
            }
            KeyAction::CopyMessage => match state.target_message() {
                Some(_) => self.send(ChatCommand::CopyMessage(state.selected_message)),
                None => state.set_flash("Nothing to copy"),
            },
            KeyAction::EditMessage => {
                let editable = state
                    .target_message()
                    .and_then(|i| state.view.message(i))
                    .is_some_and(|m| m.can_edit());
                if editable {
                    self.send(ChatCommand::EditMessage(state.selected_message));
                } else {
                    state.set_flash("Only your own messages can be edited");
                }
            }
            KeyAction::ChooseFollowUp(index) => {
                if index < state.view.follow_ups().len() {
                    state.selected_message = None;
                    self.send(ChatCommand::ChooseFollowUp(index));
                }
            }

            // Sessions
            KeyAction::ToggleSidebar => {
                if matches!(state.mode, InputMode::Sidebar | InputMode::Search) {
                    state.mode = InputMode::Normal;
                }
                self.send(ChatCommand::ToggleSidebar);
            }
            KeyAction::NewSession => {
                state.mode = InputMode::Normal;
                state.selected_message = None;
                self.send(ChatCommand::NewSession);
            }
            KeyAction::RefreshSessions => self.send(ChatCommand::RefreshSessions),
            KeyAction::SelectPrevSession => state.select_prev_session(),
            KeyAction::SelectNextSession => state.select_next_session(),
            KeyAction::OpenSession => {
                if let Some(id) = state.selected_session_id() {
                    debug!(session_id = %id.as_str(), "Opening session");
                    state.mode = InputMode::Normal;
                    state.selected_message = None;
                    self.send(ChatCommand::SwitchSession(id));
                    if state.hit_areas.sidebar_overlays {
                        self.send(ChatCommand::CloseSidebar);
                    }
                }
            }
            KeyAction::DeleteSession => {
                if let Some(id) = state.selected_session_id() {
                    self.send(ChatCommand::DeleteSession(id));
                }
            }
            KeyAction::SearchResults => {
                state.mode = InputMode::Sidebar;
                state.selected_session = 0;
            }

            // Application
            KeyAction::ShowHelp => state.show_help = !state.show_help,
            KeyAction::Quit => {
                self.send(ChatCommand::Quit);
                state.should_quit = true;
            }
        }
    }

    /// Every search keystroke goes to the controller, which debounces it
    fn search_edited(&self, state: &TuiState) {
        if state.mode == InputMode::Search {
            self.send(ChatCommand::FilterChanged(state.search_input.clone()));
        }
    }

    fn handle_mouse(&mut self, state: &mut TuiState, mouse: MouseEvent) {
        if state.modal_open() {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (column, row) = (mouse.column, mouse.row);
                if state.hit_areas.hits_toggle(column, row) {
                    self.send(ChatCommand::ToggleSidebar);
                } else if state.view.sidebar_open()
                    && state.hit_areas.closes_sidebar(column, row)
                {
                    self.send(ChatCommand::CloseSidebar);
                }
            }
            MouseEventKind::ScrollUp => state.select_prev_message(),
            MouseEventKind::ScrollDown => state.select_next_message(),
            _ => {}
        }
    }

    /// Apply a UiEvent from the controller to state
    fn apply_ui_event(&mut self, state: &mut TuiState, event: UiEvent) {
        match event {
            UiEvent::View(view) => state.apply_view(*view),
            UiEvent::FocusComposer => {
                if state.mode == InputMode::Normal && !state.modal_open() {
                    state.mode = InputMode::Insert;
                }
            }
            UiEvent::FillComposer(text) => {
                state.set_input(text);
                state.mode = InputMode::Insert;
            }
            UiEvent::Alert(message) => state.alert = Some(message),
            UiEvent::Exit => state.should_quit = true,
        }
    }

    /// Show the confirmation modal and hold on to the answer channel
    fn show_confirm(&mut self, state: &mut TuiState, request: ConfirmRequest) {
        state.confirm_prompt = Some(request.prompt);
        // A replaced request reads as declined on the controller side
        self.pending_confirm = Some(request.response_tx);
    }

    /// Send the stored answer (consumes the oneshot sender)
    fn answer_confirm(&mut self, answer: bool) {
        if let Some(tx) = self.pending_confirm.take() {
            let _ = tx.send(answer);
        }
    }
}

fn compute_layout(area: Rect, state: &TuiState, narrow_width: u16) -> MainLayout {
    MainLayout::compute(
        area,
        LayoutParams {
            input_lines: u16::try_from(state.input_line_count()).unwrap_or(u16::MAX),
            max_input_lines: MAX_INPUT_LINES,
            sidebar_open: state.view.sidebar_open(),
            narrow_width,
            follow_up_count: u16::try_from(state.view.follow_ups().len()).unwrap_or(u16::MAX),
        },
    )
}

/// Render all widgets
fn render(frame: &mut Frame, state: &TuiState, layout: &MainLayout) {
    frame.render_widget(HeaderWidget::new(state), layout.header);
    frame.render_widget(ConversationWidget::new(state), layout.conversation);
    if let Some(area) = layout.follow_ups {
        frame.render_widget(FollowUpsWidget::new(state), area);
    }
    if let Some(area) = layout.sidebar {
        frame.render_widget(
            SidebarWidget::new(state).overlay(layout.sidebar_overlays),
            area,
        );
    }
    frame.render_widget(InputWidget::new(state), layout.input);
    frame.render_widget(StatusBarWidget::new(state), layout.status_bar);

    if let Some(toast) = state.view.toast() {
        let widget = ToastWidget::new(toast);
        let area = widget.area(layout.conversation);
        frame.render_widget(widget, area);
    }

    if state.show_help {
        let area = MainLayout::centered_overlay(60, 70, frame.area());
        frame.render_widget(HelpWidget::new(), area);
    }

    if let Some(prompt) = &state.confirm_prompt {
        let area = MainLayout::centered_overlay(60, 30, frame.area());
        frame.render_widget(ModalWidget::confirm(prompt), area);
    } else if let Some(alert) = &state.alert {
        let area = MainLayout::centered_overlay(60, 30, frame.area());
        frame.render_widget(ModalWidget::alert(alert), area);
    }
}

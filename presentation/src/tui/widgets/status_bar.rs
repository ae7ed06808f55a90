//! Status bar widget — mode indicator + key hints + flash messages

use crate::tui::state::TuiState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusBarWidget<'a> {
    state: &'a TuiState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a TuiState) -> Self {
        Self { state }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(bg_style).set_char(' ');
        }

        let mode = self.state.mode;
        let mode_text = mode.indicator();
        let mode_style = Style::default()
            .fg(Color::Black)
            .bg(mode.color())
            .add_modifier(Modifier::BOLD);
        let mode_line = Line::from(Span::styled(format!(" {} ", mode_text), mode_style));
        let mode_width = mode_text.len() as u16 + 2;
        buf.set_line(area.x, area.y, &mode_line, mode_width);

        let sessions = format!(" {} chats ", self.state.view.sessions().len());
        let sessions_width = u16::try_from(sessions.len()).unwrap_or(u16::MAX);
        buf.set_line(
            area.x + mode_width,
            area.y,
            &Line::from(Span::styled(sessions, bg_style)),
            sessions_width,
        );

        // Flash message or key hints on the right
        let right_text = match &self.state.flash_message {
            Some((flash, _)) => flash.clone(),
            None => mode.hints().to_string(),
        };
        let right_width = u16::try_from(right_text.chars().count()).unwrap_or(u16::MAX);
        let right_x = area.right().saturating_sub(right_width.saturating_add(1));
        if right_x > area.x + mode_width + sessions_width {
            let right_line = Line::from(Span::styled(right_text, bg_style));
            buf.set_line(right_x, area.y, &right_line, right_width.saturating_add(1));
        }
    }
}
